//! Checkout Pricing
//!
//! Pure derivation of the checkout price breakdown from cart line items.
//! No I/O: callers supply the price snapshots captured at cart time.

pub mod calculator;

pub use calculator::{PricingConfig, compute_totals};
