//! Inventory Adjuster
//!
//! Applies signed stock deltas to catalog products. Writes touch the stock
//! field only and never re-run full record validation, so an adjustment can
//! never be blocked by unrelated validation problems on the product.
//!
//! The guard `stock + delta >= 0` is evaluated inside a single database
//! statement: concurrent checkouts cannot both take the last unit, and stock
//! can never go negative.

use crate::db::models::Product;
use crate::db::repository::{ProductRepository, RepoError};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Insufficient stock for product {product}: have {available}, need {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Applies stock deltas; the only writer of `Product.stock` outside catalog
/// management
#[derive(Clone)]
pub struct InventoryAdjuster {
    products: ProductRepository,
}

impl InventoryAdjuster {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    pub fn with_repository(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Apply a signed delta to a product's stock
    ///
    /// Negative deltas decrement (checkout), positive deltas restore
    /// (restitution). Fails with [`InventoryError::InsufficientStock`] when
    /// the decrement would push stock below zero, leaving stock untouched.
    pub async fn adjust_stock(&self, product_id: &str, delta: i64) -> InventoryResult<Product> {
        match self.products.adjust_stock(product_id, delta).await? {
            Some(product) => {
                tracing::debug!(
                    product = %product_id,
                    delta,
                    stock = product.stock,
                    "Stock adjusted"
                );
                Ok(product)
            }
            None => {
                // The conditional update matched nothing: either the product
                // is gone or the guard rejected the delta.
                match self.products.find_by_id(product_id).await? {
                    None => Err(InventoryError::ProductNotFound(product_id.to_string())),
                    Some(product) => Err(InventoryError::InsufficientStock {
                        product: product_id.to_string(),
                        available: product.stock,
                        requested: -delta,
                    }),
                }
            }
        }
    }
}

// ==================== Tests ====================
