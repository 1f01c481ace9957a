//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`products`] - catalog read API + admin product management
//! - [`orders`] - checkout and order lifecycle
//! - [`reviews`] - product reviews
//! - [`payment`] - payment intent creation
//!
//! Authorization decisions (owner-or-admin on order reads, admin gates on
//! back-office routes) live here; the domain layer below takes requester
//! identity as plain parameters and never filters on its own.

pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod reviews;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
