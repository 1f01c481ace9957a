//! Order Model
//!
//! Orders hold snapshots only. Line items copy the product's name, price and
//! image at checkout time; later catalog changes never touch a stored order.

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{OrderLineItem, OrderStatus, PaymentInfo, ShippingInfo};
use surrealdb::RecordId;

/// Persisted order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub order_items: Vec<OrderLineItem>,
    pub shipping_info: ShippingInfo,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
    pub payment_info: PaymentInfo,
    pub order_status: OrderStatus,
    /// Set at creation; an order only exists once payment is confirmed
    pub paid_at: DateTime<Utc>,
    /// Set once, on the transition to Delivered
    pub delivered_at: Option<DateTime<Utc>>,
    /// Owning user id
    pub user: String,
    pub created_at: DateTime<Utc>,
}

/// Fields required to persist a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_items: Vec<OrderLineItem>,
    pub shipping_info: ShippingInfo,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
    pub payment_info: PaymentInfo,
    pub order_status: OrderStatus,
    pub paid_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub user: String,
    pub created_at: DateTime<Utc>,
}
