//! Order API Handlers
//!
//! Checkout totals are recomputed server-side from the submitted price
//! snapshots; a client cannot dictate its own total.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::auth::{CurrentUser, require_admin};
use crate::core::ServerState;
use crate::db::models::Order;
use crate::orders::{CreateOrderInput, OrderLifecycleManager};
use crate::pricing::compute_totals;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};
use shared::order::{OrderLineItem, OrderStatus, PaymentInfo, ShippingInfo};

/// Checkout payload: priced cart plus the confirmed payment reference
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub order_items: Vec<OrderLineItem>,
    pub shipping_info: ShippingInfo,
    pub payment_info: PaymentInfo,
}

/// Create a new order from a paid cart
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<Order>> {
    let totals = compute_totals(&payload.order_items, &state.config.pricing);
    let manager = OrderLifecycleManager::new(state.db.clone());
    let order = manager
        .create_order(
            CreateOrderInput {
                order_items: payload.order_items,
                shipping_info: payload.shipping_info,
                totals,
                payment_info: payload.payment_info,
            },
            &user.id,
        )
        .await?;
    Ok(Json(order))
}

/// Get order by id (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let manager = OrderLifecycleManager::new(state.db.clone());
    let order = manager.get_order(&id).await?;
    if order.user != user.id && !user.role.is_admin() {
        return Err(AppError::Forbidden(
            "You are not allowed to view this order".to_string(),
        ));
    }
    Ok(Json(order))
}

/// Orders of the logged-in user
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let manager = OrderLifecycleManager::new(state.db.clone());
    Ok(Json(manager.list_orders_for_user(&user.id).await?))
}

/// Admin listing with the revenue sum over all orders
#[derive(Debug, Serialize)]
pub struct OrderLedgerResponse {
    pub total_amount: Decimal,
    pub orders: Vec<Order>,
}

/// List all orders (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<OrderLedgerResponse>> {
    require_admin(&user)?;
    let manager = OrderLifecycleManager::new(state.db.clone());
    let ledger = manager.list_all_orders().await?;
    Ok(Json(OrderLedgerResponse {
        total_amount: ledger.total_amount,
        orders: ledger.orders,
    }))
}

/// Status change request
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

/// Advance the fulfillment status (admin)
pub async fn advance_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<Order>> {
    require_admin(&user)?;
    let manager = OrderLifecycleManager::new(state.db.clone());
    let order = manager.advance_status(&id, payload.status).await?;
    Ok(Json(order))
}

/// Delete an order, restoring stock when it never shipped (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    require_admin(&user)?;
    let manager = OrderLifecycleManager::new(state.db.clone());
    manager.delete_order(&id).await?;
    Ok(ok_with_message((), "Order deleted"))
}
