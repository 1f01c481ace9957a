//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, require_admin};
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::{CatalogQuery, ProductRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// Query params for the catalog listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f64>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    4
}

/// Catalog page plus the counts the storefront needs for pagination
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products_count: i64,
    pub filtered_products_count: i64,
    pub res_per_page: u32,
    pub products: Vec<Product>,
}

/// List catalog products with search, filters and paging
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ProductListResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    let page = repo
        .query(CatalogQuery {
            keyword: query.keyword,
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
            min_rating: query.min_rating,
            page: query.page,
            per_page: query.per_page,
        })
        .await?;
    Ok(Json(ProductListResponse {
        products_count: page.products_count,
        filtered_products_count: page.filtered_count,
        res_per_page: page.res_per_page,
        products: page.products,
    }))
}

/// Get product by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// List every product, unfiltered (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Product>>> {
    require_admin(&user)?;
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// Create a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload, &user.id).await?;
    Ok(Json(product))
}

/// Update a product (admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    require_admin(&user)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// Delete a product (admin)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    require_admin(&user)?;
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Product deleted"))
}
