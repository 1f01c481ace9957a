//! Review API module

mod handler;

use axum::{Router, routing::put};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", review_routes())
}

fn review_routes() -> Router<ServerState> {
    Router::new().route(
        "/",
        put(handler::upsert)
            .get(handler::list)
            .delete(handler::remove),
    )
}
