//! End-to-end order lifecycle over the in-memory engine
//!
//! Walks a cart through pricing, checkout, fulfillment and deletion, checking
//! stock at every step.

use rust_decimal::Decimal;
use shared::order::{OrderLineItem, OrderStatus, PaymentInfo, ShippingInfo};
use store_server::db::DbService;
use store_server::db::models::{Product, ProductCategory, ProductCreate};
use store_server::db::repository::{CatalogQuery, ProductRepository};
use store_server::orders::{CreateOrderInput, OrderLifecycleManager};
use store_server::pricing::{PricingConfig, compute_totals};
use store_server::reviews::ReviewAggregator;

async fn setup() -> (OrderLifecycleManager, ProductRepository, ReviewAggregator) {
    let db = DbService::memory().await.unwrap().db;
    (
        OrderLifecycleManager::new(db.clone()),
        ProductRepository::new(db.clone()),
        ReviewAggregator::new(db),
    )
}

async fn seed_product(products: &ProductRepository, name: &str, price: &str, stock: i64) -> Product {
    products
        .create(
            ProductCreate {
                name: name.to_string(),
                description: format!("{} official bottling", name),
                price: price.parse().unwrap(),
                strength: 46.0,
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

fn checkout_input(items: Vec<OrderLineItem>) -> CreateOrderInput {
    let totals = compute_totals(&items, &PricingConfig::default());
    CreateOrderInput {
        order_items: items,
        shipping_info: ShippingInfo {
            address: "12 Harbour Street".to_string(),
            city: "Campbeltown".to_string(),
            phone_no: "01586 000000".to_string(),
            postal_code: "PA28 6JA".to_string(),
            country: "United Kingdom".to_string(),
        },
        totals,
        payment_info: PaymentInfo {
            id: "pi_e2e_0001".to_string(),
            status: "succeeded".to_string(),
        },
    }
}

#[tokio::test]
async fn full_lifecycle_round_trips_stock() {
    let (manager, products, _) = setup().await;
    let bottle = seed_product(&products, "Glen Dram 12", "49.90", 6).await;

    // Checkout: qty 2 against stock 6
    let order = manager
        .create_order(checkout_input(vec![line_item(&bottle, 2)]), "user:alice")
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    assert_eq!(order.order_status, OrderStatus::Processing);
    assert_eq!(
        order.total_price,
        order.items_price + order.shipping_price + order.tax_price
    );

    let after_checkout = products.find_by_id(&id_of(&bottle)).await.unwrap().unwrap();
    assert_eq!(after_checkout.stock, 4);

    // Deleting the still-Processing order restores stock in full
    manager.delete_order(&order_id).await.unwrap();
    let after_delete = products.find_by_id(&id_of(&bottle)).await.unwrap().unwrap();
    assert_eq!(after_delete.stock, 6);
}

#[tokio::test]
async fn delivered_orders_keep_their_stock_taken() {
    let (manager, products, _) = setup().await;
    let bottle = seed_product(&products, "Glen Dram 18", "89.00", 6).await;

    let order = manager
        .create_order(checkout_input(vec![line_item(&bottle, 2)]), "user:alice")
        .await
        .unwrap();
    let order_id = order.id.as_ref().unwrap().to_string();

    manager
        .advance_status(&order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    manager.delete_order(&order_id).await.unwrap();

    let after = products.find_by_id(&id_of(&bottle)).await.unwrap().unwrap();
    assert_eq!(after.stock, 4);
}

#[tokio::test]
async fn admin_ledger_is_stable_between_reads() {
    let (manager, products, _) = setup().await;
    let bottle = seed_product(&products, "Glen Dram 12", "49.90", 10).await;

    manager
        .create_order(checkout_input(vec![line_item(&bottle, 1)]), "user:alice")
        .await
        .unwrap();
    manager
        .create_order(checkout_input(vec![line_item(&bottle, 2)]), "user:bob")
        .await
        .unwrap();

    let first = manager.list_all_orders().await.unwrap();
    let second = manager.list_all_orders().await.unwrap();

    assert_eq!(first.orders.len(), 2);
    assert_eq!(first.total_amount, second.total_amount);
    assert!(first.total_amount > Decimal::ZERO);
}

#[tokio::test]
async fn catalog_query_filters_and_pages() {
    let (_, products, _) = setup().await;
    seed_product(&products, "Islay Smoke 10", "55.00", 3).await;
    seed_product(&products, "Islay Smoke 16", "95.00", 3).await;
    seed_product(&products, "Lowland Light", "35.00", 3).await;

    let page = products
        .query(CatalogQuery {
            keyword: Some("islay".to_string()),
            per_page: 4,
            page: 1,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.products_count, 3);
    assert_eq!(page.filtered_count, 2);
    assert!(page.products.iter().all(|p| p.name.contains("Islay")));

    let expensive = products
        .query(CatalogQuery {
            min_price: Some("50".parse().unwrap()),
            per_page: 4,
            page: 1,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(expensive.filtered_count, 2);
}

#[tokio::test]
async fn reviews_feed_catalog_rating_filter() {
    let (_, products, reviews) = setup().await;
    let bottle = seed_product(&products, "Glen Dram 12", "49.90", 6).await;

    reviews
        .upsert_review(&id_of(&bottle), "user:alice", "Alice", 5, "Superb".to_string())
        .await
        .unwrap();
    reviews
        .upsert_review(&id_of(&bottle), "user:bob", "Bob", 4, "Very good".to_string())
        .await
        .unwrap();

    let highly_rated = products
        .query(CatalogQuery {
            min_rating: Some(4.0),
            per_page: 4,
            page: 1,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(highly_rated.filtered_count, 1);
    assert_eq!(highly_rated.products[0].ratings, 4.5);
}
