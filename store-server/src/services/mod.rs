//! External Service Adapters
//!
//! - [`payment`] - card payment gateway boundary

pub mod payment;

pub use payment::{
    MockGateway, PaymentConfig, PaymentError, PaymentGateway, PaymentIntent, StripeGateway,
};
