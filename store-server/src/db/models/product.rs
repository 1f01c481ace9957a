//! Product Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// Closed category set of the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProductCategory {
    #[serde(rename = "Single Malt")]
    SingleMalt,
    #[serde(rename = "Blend")]
    Blend,
    #[serde(rename = "Single Grain")]
    SingleGrain,
    #[serde(rename = "Pure Malt")]
    PureMalt,
    #[serde(rename = "Single Cask")]
    SingleCask,
    #[serde(rename = "New Malt")]
    NewMalt,
}

/// Image reference (upload/storage handled by the object store)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductImage {
    pub public_id: String,
    pub url: String,
}

/// Customer review, embedded in the product record
///
/// At most one review per (product, user) pair; a repeat submission by the
/// same user replaces the earlier entry in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Review id, minted on insert
    pub id: String,
    /// Reviewer user id
    pub user: String,
    /// Reviewer display name snapshot
    pub name: String,
    /// Star rating, 1-5
    pub rating: u8,
    pub comment: String,
}

/// Product model
///
/// `ratings` and `num_of_reviews` are derived from `reviews` and are only
/// ever written by the review aggregator. `stock` is only ever written by the
/// inventory adjuster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Alcohol by volume, percent
    pub strength: f64,
    /// Bottle volume in centiliters
    pub volume: i32,
    pub category: ProductCategory,
    pub stock: i64,
    /// Mean of reviews[].rating, 0 when there are none
    #[serde(default)]
    pub ratings: f64,
    #[serde(default)]
    pub num_of_reviews: u32,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Owning (creating) admin user id
    pub user: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price: Decimal,
    pub strength: f64,
    pub volume: i32,
    pub category: ProductCategory,
    pub stock: i64,
    pub images: Option<Vec<ProductImage>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub strength: Option<f64>,
    pub volume: Option<i32>,
    pub category: Option<ProductCategory>,
    pub stock: Option<i64>,
    pub images: Option<Vec<ProductImage>>,
}
