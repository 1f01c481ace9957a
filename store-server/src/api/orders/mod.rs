//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", order_routes())
        .nest("/api/admin/orders", admin_order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/mine", get(handler::my_orders))
        .route("/{id}", get(handler::get_by_id))
}

fn admin_order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_all))
        .route("/{id}", put(handler::advance_status).delete(handler::delete))
}
