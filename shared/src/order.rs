//! Shared order types
//!
//! Snapshot semantics: everything in an order is a copy taken at checkout
//! time. Changing a product after purchase must not alter historical orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Status
// ============================================================================

/// Fulfillment status of an order
///
/// The chain is forward-only: `Processing → Shipped → Delivered`. A status
/// may be skipped (Processing → Delivered) but never revisited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Position in the fulfillment chain
    fn rank(self) -> u8 {
        match self {
            OrderStatus::Processing => 0,
            OrderStatus::Shipped => 1,
            OrderStatus::Delivered => 2,
        }
    }

    /// Whether an order in this status may move to `next`
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        self != OrderStatus::Delivered && next.rank() > self.rank()
    }

    pub fn is_delivered(self) -> bool {
        self == OrderStatus::Delivered
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Order Snapshots
// ============================================================================

/// One purchased line: product reference plus name/price/image snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product record id ("product:…")
    pub product: String,
    /// Name snapshot
    pub name: String,
    /// Unit price snapshot, immune to later catalog price changes
    pub price: Decimal,
    /// Primary image URL snapshot
    #[serde(default)]
    pub image: String,
    /// Units purchased (≥ 1)
    pub quantity: u32,
}

/// Shipping address snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub phone_no: String,
    pub postal_code: String,
    pub country: String,
}

/// Gateway payment reference attached to an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentInfo {
    /// Gateway transaction id
    pub id: String,
    /// Gateway-reported status (e.g. "succeeded")
    pub status: String,
}

// ============================================================================
// Checkout Totals
// ============================================================================

/// Price breakdown fixed at order creation
///
/// `total_price` always equals the sum of the other three (2-decimal
/// rounding applied by the pricing calculator).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CheckoutTotals {
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub tax_price: Decimal,
    pub total_price: Decimal,
}

impl CheckoutTotals {
    /// Sum of the three components, for consistency checks
    pub fn parts_sum(&self) -> Decimal {
        self.items_price + self.shipping_price + self.tax_price
    }
}
