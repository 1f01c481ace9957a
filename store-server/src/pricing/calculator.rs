//! Checkout Totals Calculator
//!
//! Derives `{items, shipping, tax, total}` from cart line items:
//! - `items_price` = Σ(unit price × quantity)
//! - `shipping_price` = 0 above the free-shipping threshold, else a flat fee
//! - `tax_price` = items_price × tax rate, rounded to 2 decimals
//! - `total_price` = items + shipping + tax, rounded to 2 decimals
//!
//! Thresholds and rates are configuration, not policy baked into the code.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::order::{CheckoutTotals, OrderLineItem};

/// Pricing thresholds and rates
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Items total above which shipping is free
    pub free_shipping_threshold: Decimal,
    /// Flat shipping fee charged below the threshold
    pub shipping_flat_fee: Decimal,
    /// Sales tax rate applied to the items total (0.05 = 5%)
    pub tax_rate: Decimal,
}

impl PricingConfig {
    /// Load pricing configuration from the environment
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            free_shipping_threshold: env_decimal(
                "FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            ),
            shipping_flat_fee: env_decimal("SHIPPING_FLAT_FEE", defaults.shipping_flat_fee),
            tax_rate: env_decimal("TAX_RATE", defaults.tax_rate),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(200),
            shipping_flat_fee: Decimal::from(25),
            // 5%
            tax_rate: Decimal::new(5, 2),
        }
    }
}

fn env_decimal(var: &str, default: Decimal) -> Decimal {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Round a money amount to 2 decimal places
fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the checkout price breakdown for a priced cart
///
/// Deterministic and independent of current catalog prices: the line items
/// carry their own unit-price snapshots.
pub fn compute_totals(items: &[OrderLineItem], config: &PricingConfig) -> CheckoutTotals {
    let items_price: Decimal = items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum();
    let items_price = round_money(items_price);

    let shipping_price = if items_price > config.free_shipping_threshold {
        Decimal::ZERO
    } else {
        config.shipping_flat_fee
    };

    let tax_price = round_money(items_price * config.tax_rate);
    let total_price = round_money(items_price + shipping_price + tax_price);

    CheckoutTotals {
        items_price,
        shipping_price,
        tax_price,
        total_price,
    }
}

// ==================== Tests ====================
