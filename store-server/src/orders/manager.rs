//! Order Lifecycle Manager
//!
//! Orchestrates the order lifecycle against the catalog:
//! - creation from a priced, paid cart with per-line stock decrements
//! - fulfillment status transitions (forward-only chain)
//! - deletion with stock restitution for undelivered orders
//!
//! # Creation Flow
//!
//! ```text
//! create_order(input, user)
//!     ├─ 1. Validate line items, totals and payment reference
//!     ├─ 2. Decrement stock per line item (conditional update)
//!     │      └─ on failure: re-credit every decrement already applied
//!     ├─ 3. Persist the order (status Processing, paid_at = now)
//!     │      └─ on failure: re-credit every decrement
//!     └─ 4. Return the created order
//! ```
//!
//! Stock is reserved before the order record exists, so a half-created
//! checkout can never leave an order referencing stock that was not taken.

use super::error::{OrderError, OrderResult};
use crate::db::models::{Order, OrderCreate};
use crate::db::repository::OrderRepository;
use crate::inventory::InventoryAdjuster;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::order::{CheckoutTotals, OrderLineItem, OrderStatus, PaymentInfo, ShippingInfo};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Everything the checkout flow hands over for persistence
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub order_items: Vec<OrderLineItem>,
    pub shipping_info: ShippingInfo,
    pub totals: CheckoutTotals,
    pub payment_info: PaymentInfo,
}

/// Admin order listing with the revenue sum over all returned orders
#[derive(Debug, Clone)]
pub struct OrderLedger {
    pub total_amount: Decimal,
    pub orders: Vec<Order>,
}

#[derive(Clone)]
pub struct OrderLifecycleManager {
    orders: OrderRepository,
    inventory: InventoryAdjuster,
}

impl OrderLifecycleManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            inventory: InventoryAdjuster::new(db),
        }
    }

    /// Persist a paid cart as a new order and take its stock
    ///
    /// The decrement loop is all-or-nothing: any failure re-credits the
    /// deltas already applied and nothing is persisted.
    pub async fn create_order(&self, input: CreateOrderInput, user_id: &str) -> OrderResult<Order> {
        Self::validate(&input)?;

        let mut applied: Vec<(String, i64)> = Vec::with_capacity(input.order_items.len());
        for item in &input.order_items {
            let quantity = i64::from(item.quantity);
            match self.inventory.adjust_stock(&item.product, -quantity).await {
                Ok(_) => applied.push((item.product.clone(), quantity)),
                Err(e) => {
                    self.compensate(&applied).await;
                    return Err(e.into());
                }
            }
        }

        let now = Utc::now();
        let data = OrderCreate {
            order_items: input.order_items,
            shipping_info: input.shipping_info,
            items_price: input.totals.items_price,
            tax_price: input.totals.tax_price,
            shipping_price: input.totals.shipping_price,
            total_price: input.totals.total_price,
            payment_info: input.payment_info,
            order_status: OrderStatus::Processing,
            paid_at: now,
            delivered_at: None,
            user: user_id.to_string(),
            created_at: now,
        };

        match self.orders.create(data).await {
            Ok(order) => {
                tracing::info!(
                    order = %order_id_str(&order),
                    user = %user_id,
                    total = %order.total_price,
                    "Order created"
                );
                Ok(order)
            }
            Err(e) => {
                self.compensate(&applied).await;
                Err(e.into())
            }
        }
    }

    /// Fetch a single order
    ///
    /// Owner/admin access control is enforced by the calling layer.
    pub async fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    /// All orders owned by a user, in insertion order
    pub async fn list_orders_for_user(&self, user_id: &str) -> OrderResult<Vec<Order>> {
        Ok(self.orders.find_by_user(user_id).await?)
    }

    /// All orders plus the revenue sum (admin)
    pub async fn list_all_orders(&self) -> OrderResult<OrderLedger> {
        let orders = self.orders.find_all().await?;
        let total_amount = orders.iter().map(|o| o.total_price).sum();
        Ok(OrderLedger {
            total_amount,
            orders,
        })
    }

    /// Move an order forward in the fulfillment chain
    ///
    /// Stock was already taken at creation; advancing the status has no
    /// inventory side effect. `delivered_at` is stamped on the transition to
    /// `Delivered`.
    pub async fn advance_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> OrderResult<Order> {
        let order = self.get_order(order_id).await?;

        if order.order_status.is_delivered() {
            return Err(OrderError::InvalidTransition(
                "This order has already been delivered".to_string(),
            ));
        }
        if !order.order_status.can_advance_to(new_status) {
            return Err(OrderError::InvalidTransition(format!(
                "Cannot move order from {} to {}",
                order.order_status, new_status
            )));
        }

        let delivered_at = new_status.is_delivered().then(Utc::now);
        let updated = self
            .orders
            .update_status(order_id, new_status, delivered_at)
            .await?;

        tracing::info!(order = %order_id, status = %new_status, "Order status advanced");
        Ok(updated)
    }

    /// Delete an order, returning its stock when the goods never shipped out
    ///
    /// Undelivered orders re-credit every line item's quantity before the
    /// record is removed; delivered orders are removed as-is.
    pub async fn delete_order(&self, order_id: &str) -> OrderResult<()> {
        let order = self.get_order(order_id).await?;

        if !order.order_status.is_delivered() {
            for item in &order.order_items {
                match self
                    .inventory
                    .adjust_stock(&item.product, i64::from(item.quantity))
                    .await
                {
                    Ok(_) => {}
                    Err(crate::inventory::InventoryError::ProductNotFound(id)) => {
                        // Stock cannot be returned to a product that no
                        // longer exists; the deletion still goes through.
                        tracing::warn!(
                            order = %order_id,
                            product = %id,
                            "Restitution skipped, product deleted"
                        );
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        self.orders.delete(order_id).await?;
        tracing::info!(order = %order_id, "Order deleted");
        Ok(())
    }

    /// Re-credit decrements applied before a failed creation
    async fn compensate(&self, applied: &[(String, i64)]) {
        for (product_id, quantity) in applied {
            if let Err(e) = self.inventory.adjust_stock(product_id, *quantity).await {
                // Manual reconciliation is the only way out here.
                tracing::error!(
                    product = %product_id,
                    quantity,
                    error = %e,
                    "Failed to re-credit stock after aborted order creation"
                );
            }
        }
    }

    fn validate(input: &CreateOrderInput) -> OrderResult<()> {
        if input.order_items.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        for item in &input.order_items {
            if item.quantity == 0 {
                return Err(OrderError::Validation(format!(
                    "Quantity for product {} must be at least 1",
                    item.product
                )));
            }
            if item.price < Decimal::ZERO {
                return Err(OrderError::Validation(format!(
                    "Price for product {} cannot be negative",
                    item.product
                )));
            }
        }
        if input.totals.total_price != input.totals.parts_sum() {
            return Err(OrderError::Validation(
                "Total price must equal items + shipping + tax".to_string(),
            ));
        }
        if input.payment_info.id.is_empty() {
            return Err(OrderError::Validation(
                "Missing payment transaction reference".to_string(),
            ));
        }
        Ok(())
    }
}

fn order_id_str(order: &Order) -> String {
    order
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default()
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{Product, ProductCategory, ProductCreate};
    use crate::db::repository::ProductRepository;
    use crate::pricing::{PricingConfig, compute_totals};

    async fn setup() -> (OrderLifecycleManager, ProductRepository) {
        let db = DbService::memory().await.unwrap().db;
        (
            OrderLifecycleManager::new(db.clone()),
            ProductRepository::new(db),
        )
    }

    async fn seed_product(products: &ProductRepository, name: &str, stock: i64) -> Product {
        products
            .create(
                ProductCreate {
                    name: name.to_string(),
                    description: "Test bottling".to_string(),
                    price: "49.90".parse().unwrap(),
                    strength: 43.0,
                    volume: 70,
                    category: ProductCategory::SingleMalt,
                    stock,
                    images: None,
                },
                "user:admin",
            )
            .await
            .unwrap()
    }

    fn id_of(product: &Product) -> String {
        product.id.as_ref().unwrap().to_string()
    }

    fn line_item(product: &Product, quantity: u32) -> OrderLineItem {
        OrderLineItem {
            product: id_of(product),
            name: product.name.clone(),
            price: product.price,
            image: String::new(),
            quantity,
        }
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            address: "12 Harbour Street".to_string(),
            city: "Campbeltown".to_string(),
            phone_no: "01586 000000".to_string(),
            postal_code: "PA28 6JA".to_string(),
            country: "United Kingdom".to_string(),
        }
    }

    fn payment() -> PaymentInfo {
        PaymentInfo {
            id: "pi_test_0001".to_string(),
            status: "succeeded".to_string(),
        }
    }

    fn input_for(items: Vec<OrderLineItem>) -> CreateOrderInput {
        let totals = compute_totals(&items, &PricingConfig::default());
        CreateOrderInput {
            order_items: items,
            shipping_info: shipping(),
            totals,
            payment_info: payment(),
        }
    }

    // ==================== Creation Tests ====================

    #[tokio::test]
    async fn test_create_order_decrements_stock_per_line() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;

        // Two lines against the same product: qty 2 and qty 1
        let input = input_for(vec![line_item(&product, 2), line_item(&product, 1)]);
        let order = manager.create_order(input, "user:alice").await.unwrap();

        assert_eq!(order.order_status, OrderStatus::Processing);
        let product = products.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(product.stock, 3);
    }

    #[tokio::test]
    async fn test_create_order_fixes_price_snapshot() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;

        let input = input_for(vec![line_item(&product, 1)]);
        let order = manager.create_order(input, "user:alice").await.unwrap();

        // Raising the catalog price later must not change the stored order
        products
            .update(
                &id_of(&product),
                crate::db::models::ProductUpdate {
                    name: None,
                    description: None,
                    price: Some("99.99".parse().unwrap()),
                    strength: None,
                    volume: None,
                    category: None,
                    stock: None,
                    images: None,
                },
            )
            .await
            .unwrap();

        let stored = manager
            .get_order(&order.id.as_ref().unwrap().to_string())
            .await
            .unwrap();
        assert_eq!(stored.order_items[0].price, "49.90".parse().unwrap());
        assert_eq!(stored.total_price, order.total_price);
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty_cart() {
        let (manager, _) = setup().await;

        let err = manager
            .create_order(input_for(vec![]), "user:alice")
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_order_rejects_zero_quantity() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;

        let err = manager
            .create_order(input_for(vec![line_item(&product, 0)]), "user:alice")
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_order_rejects_inconsistent_totals() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;

        let mut input = input_for(vec![line_item(&product, 1)]);
        input.totals.total_price += Decimal::ONE;

        let err = manager.create_order(input, "user:alice").await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_line_re_credits_earlier_lines() {
        let (manager, products) = setup().await;
        let plenty = seed_product(&products, "Glen Plenty", 5).await;
        let scarce = seed_product(&products, "Glen Scarce", 1).await;

        // Second line over-asks; the first line's decrement must be undone
        let input = input_for(vec![line_item(&plenty, 2), line_item(&scarce, 3)]);
        let err = manager.create_order(input, "user:alice").await.unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock { .. }));

        let plenty = products.find_by_id(&id_of(&plenty)).await.unwrap().unwrap();
        let scarce = products.find_by_id(&id_of(&scarce)).await.unwrap().unwrap();
        assert_eq!(plenty.stock, 5);
        assert_eq!(scarce.stock, 1);

        // Nothing was persisted
        let ledger = manager.list_all_orders().await.unwrap();
        assert!(ledger.orders.is_empty());
    }

    // ==================== Status Transition Tests ====================

    #[tokio::test]
    async fn test_advance_through_chain_sets_delivered_at() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        let shipped = manager
            .advance_status(&order_id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(shipped.order_status, OrderStatus::Shipped);
        assert!(shipped.delivered_at.is_none());

        let delivered = manager
            .advance_status(&order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(delivered.order_status, OrderStatus::Delivered);
        assert!(delivered.delivered_at.is_some());
    }

    #[tokio::test]
    async fn test_advance_has_no_stock_side_effect() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 2)]), "user:alice")
            .await
            .unwrap();

        manager
            .advance_status(
                &order.id.as_ref().unwrap().to_string(),
                OrderStatus::Delivered,
            )
            .await
            .unwrap();

        let product = products.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(product.stock, 4);
    }

    #[tokio::test]
    async fn test_advance_delivered_order_fails() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        manager
            .advance_status(&order_id, OrderStatus::Delivered)
            .await
            .unwrap();

        let err = manager
            .advance_status(&order_id, OrderStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn test_status_never_regresses() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        manager
            .advance_status(&order_id, OrderStatus::Shipped)
            .await
            .unwrap();

        let err = manager
            .advance_status(&order_id, OrderStatus::Processing)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
    }

    // ==================== Deletion Tests ====================

    #[tokio::test]
    async fn test_delete_processing_order_restores_stock() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 2)]), "user:alice")
            .await
            .unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        let before = products.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(before.stock, 4);

        manager.delete_order(&order_id).await.unwrap();

        // Round-trip restitution: back to the original 6
        let after = products.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(after.stock, 6);
        assert!(matches!(
            manager.get_order(&order_id).await.unwrap_err(),
            OrderError::OrderNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_delivered_order_keeps_stock() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 6).await;
        let order = manager
            .create_order(input_for(vec![line_item(&product, 2)]), "user:alice")
            .await
            .unwrap();
        let order_id = order.id.as_ref().unwrap().to_string();

        manager
            .advance_status(&order_id, OrderStatus::Delivered)
            .await
            .unwrap();
        manager.delete_order(&order_id).await.unwrap();

        // Goods are gone; nothing comes back
        let product = products.find_by_id(&id_of(&product)).await.unwrap().unwrap();
        assert_eq!(product.stock, 4);
    }

    #[tokio::test]
    async fn test_delete_missing_order_is_not_found() {
        let (manager, _) = setup().await;

        let err = manager.delete_order("order:missing").await.unwrap_err();
        assert!(matches!(err, OrderError::OrderNotFound(_)));
    }

    // ==================== Listing Tests ====================

    #[tokio::test]
    async fn test_list_orders_for_user_filters_by_owner() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 10).await;

        manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();
        manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:bob")
            .await
            .unwrap();
        manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();

        let mine = manager.list_orders_for_user("user:alice").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.user == "user:alice"));
    }

    #[tokio::test]
    async fn test_list_all_orders_sums_totals() {
        let (manager, products) = setup().await;
        let product = seed_product(&products, "Glen Test 12", 10).await;

        let first = manager
            .create_order(input_for(vec![line_item(&product, 1)]), "user:alice")
            .await
            .unwrap();
        let second = manager
            .create_order(input_for(vec![line_item(&product, 3)]), "user:bob")
            .await
            .unwrap();

        let ledger = manager.list_all_orders().await.unwrap();
        assert_eq!(ledger.orders.len(), 2);
        assert_eq!(
            ledger.total_amount,
            first.total_price + second.total_price
        );

        // Idempotent without intervening mutation
        let again = manager.list_all_orders().await.unwrap();
        assert_eq!(again.total_amount, ledger.total_amount);
    }
}
