//! Order lifecycle errors

use crate::db::repository::RepoError;
use crate::inventory::InventoryError;
use crate::utils::AppError;
use thiserror::Error;

/// Errors produced by the order lifecycle manager
///
/// One tagged kind per failure site; the API boundary matches exhaustively
/// and never rewrites errors after the fact.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Insufficient stock for product {product}: have {available}, need {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<RepoError> for OrderError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => OrderError::OrderNotFound(msg),
            RepoError::Validation(msg) => OrderError::Validation(msg),
            RepoError::Duplicate(msg) | RepoError::Database(msg) => OrderError::Storage(msg),
        }
    }
}

impl From<InventoryError> for OrderError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::ProductNotFound(id) => OrderError::ProductNotFound(id),
            InventoryError::InsufficientStock {
                product,
                available,
                requested,
            } => OrderError::InsufficientStock {
                product,
                available,
                requested,
            },
            InventoryError::Repo(e) => OrderError::Storage(e.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::OrderNotFound(msg) => AppError::NotFound(msg),
            OrderError::ProductNotFound(msg) => {
                AppError::NotFound(format!("Product not found: {}", msg))
            }
            OrderError::InvalidTransition(msg) => AppError::BusinessRule(msg),
            OrderError::InsufficientStock { .. } => AppError::InsufficientStock(err.to_string()),
            OrderError::Validation(msg) => AppError::Validation(msg),
            OrderError::Storage(msg) => AppError::Database(msg),
        }
    }
}
