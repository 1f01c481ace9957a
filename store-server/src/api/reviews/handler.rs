//! Review API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::auth::{CurrentUser, require_admin};
use crate::core::ServerState;
use crate::db::models::{Product, Review};
use crate::reviews::ReviewAggregator;
use crate::utils::AppResult;

/// Review submission; a second submission by the same user replaces the
/// first
#[derive(Debug, Deserialize)]
pub struct SubmitReviewRequest {
    pub product_id: String,
    pub rating: u8,
    pub comment: String,
}

/// Create or update the requester's review of a product
pub async fn upsert(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SubmitReviewRequest>,
) -> AppResult<Json<Product>> {
    let aggregator = ReviewAggregator::new(state.db.clone());
    let product = aggregator
        .upsert_review(
            &payload.product_id,
            &user.id,
            &user.name,
            payload.rating,
            payload.comment,
        )
        .await?;
    Ok(Json(product))
}

/// Query params for listing a product's reviews
#[derive(Debug, Deserialize)]
pub struct ListReviewsQuery {
    pub id: String,
}

/// List a product's reviews
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListReviewsQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let aggregator = ReviewAggregator::new(state.db.clone());
    Ok(Json(aggregator.list_reviews(&query.id).await?))
}

/// Query params for removing a review
#[derive(Debug, Deserialize)]
pub struct RemoveReviewQuery {
    pub product_id: String,
    pub id: String,
}

/// Remove a single review (admin back-office)
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<RemoveReviewQuery>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    let aggregator = ReviewAggregator::new(state.db.clone());
    let product = aggregator
        .remove_review(&query.product_id, &query.id)
        .await?;
    Ok(Json(product))
}
