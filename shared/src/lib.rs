//! Shared types for the Dram storefront
//!
//! Wire-visible domain types used by both the store server and storefront
//! clients: order status and snapshots, checkout totals, shipping and payment
//! info, and user roles.

pub mod order;
pub mod types;

// Re-exports
pub use order::{
    CheckoutTotals, OrderLineItem, OrderStatus, PaymentInfo, ShippingInfo,
};
pub use types::UserRole;
