//! Review errors

use crate::db::repository::RepoError;
use crate::utils::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

impl From<RepoError> for ReviewError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => ReviewError::ProductNotFound(msg),
            RepoError::Validation(msg) => ReviewError::Validation(msg),
            RepoError::Duplicate(msg) | RepoError::Database(msg) => ReviewError::Storage(msg),
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::ProductNotFound(msg) | ReviewError::ReviewNotFound(msg) => {
                AppError::NotFound(msg)
            }
            ReviewError::Validation(msg) => AppError::Validation(msg),
            ReviewError::Storage(msg) => AppError::Database(msg),
        }
    }
}
