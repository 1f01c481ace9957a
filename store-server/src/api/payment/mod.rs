//! Payment API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", payment_routes())
}

fn payment_routes() -> Router<ServerState> {
    Router::new()
        .route("/process", post(handler::process))
        .route("/key", get(handler::publishable_key))
}
