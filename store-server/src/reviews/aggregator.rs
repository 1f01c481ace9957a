//! Review Aggregator
//!
//! Maintains the review collection embedded in a product together with its
//! derived aggregates: `ratings` always equals the mean of the collection
//! (0 when empty), `num_of_reviews` always equals its length.
//!
//! One review per (product, user): a repeat submission by the same user
//! rewrites the existing entry in place and never changes its position.

use super::error::{ReviewError, ReviewResult};
use crate::db::models::{Product, Review};
use crate::db::repository::ProductRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ReviewAggregator {
    products: ProductRepository,
}

impl ReviewAggregator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    /// Create the requester's review of a product, or rewrite it if one
    /// already exists
    pub async fn upsert_review(
        &self,
        product_id: &str,
        user_id: &str,
        user_name: &str,
        rating: u8,
        comment: String,
    ) -> ReviewResult<Product> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        if comment.trim().is_empty() {
            return Err(ReviewError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }

        let product = self.load(product_id).await?;

        let mut reviews = product.reviews;
        match reviews.iter_mut().find(|r| r.user == user_id) {
            Some(existing) => {
                existing.rating = rating;
                existing.comment = comment;
            }
            None => reviews.push(Review {
                id: uuid::Uuid::new_v4().to_string(),
                user: user_id.to_string(),
                name: user_name.to_string(),
                rating,
                comment,
            }),
        }

        self.persist(product_id, reviews).await
    }

    /// Remove a single review by id
    pub async fn remove_review(&self, product_id: &str, review_id: &str) -> ReviewResult<Product> {
        let product = self.load(product_id).await?;

        let before = product.reviews.len();
        let reviews: Vec<Review> = product
            .reviews
            .into_iter()
            .filter(|r| r.id != review_id)
            .collect();
        if reviews.len() == before {
            return Err(ReviewError::ReviewNotFound(format!(
                "Review {} not found on product {}",
                review_id, product_id
            )));
        }

        self.persist(product_id, reviews).await
    }

    /// All reviews of a product
    pub async fn list_reviews(&self, product_id: &str) -> ReviewResult<Vec<Review>> {
        Ok(self.load(product_id).await?.reviews)
    }

    async fn load(&self, product_id: &str) -> ReviewResult<Product> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ReviewError::ProductNotFound(product_id.to_string()))
    }

    /// Write the collection and both aggregates in one statement
    async fn persist(&self, product_id: &str, reviews: Vec<Review>) -> ReviewResult<Product> {
        let ratings = mean_rating(&reviews);
        let num_of_reviews = reviews.len() as u32;
        Ok(self
            .products
            .set_reviews(product_id, &reviews, ratings, num_of_reviews)
            .await?)
    }
}

/// Mean of all ratings; 0 for an empty collection
fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / reviews.len() as f64
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{ProductCategory, ProductCreate};

    async fn setup() -> (ReviewAggregator, ProductRepository, String) {
        let db = DbService::memory().await.unwrap().db;
        let products = ProductRepository::new(db.clone());
        let created = products
            .create(
                ProductCreate {
                    name: "Glen Test 12".to_string(),
                    description: "Test bottling".to_string(),
                    price: "49.90".parse().unwrap(),
                    strength: 43.0,
                    volume: 70,
                    category: ProductCategory::SingleMalt,
                    stock: 6,
                    images: None,
                },
                "user:admin",
            )
            .await
            .unwrap();
        let id = created.id.as_ref().unwrap().to_string();
        (ReviewAggregator::new(db), products, id)
    }

    // ==================== Upsert Tests ====================

    #[tokio::test]
    async fn test_first_review_sets_aggregates() {
        let (aggregator, _, product_id) = setup().await;

        let product = aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 4, "Peaty".to_string())
            .await
            .unwrap();

        assert_eq!(product.num_of_reviews, 1);
        assert_eq!(product.ratings, 4.0);
        assert_eq!(product.reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_reviews_from_different_users_average() {
        let (aggregator, _, product_id) = setup().await;

        aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 4, "Peaty".to_string())
            .await
            .unwrap();
        let product = aggregator
            .upsert_review(&product_id, "user:bob", "Bob", 2, "Thin".to_string())
            .await
            .unwrap();

        assert_eq!(product.num_of_reviews, 2);
        assert_eq!(product.ratings, 3.0);
    }

    #[tokio::test]
    async fn test_repeat_review_replaces_in_place() {
        let (aggregator, _, product_id) = setup().await;

        aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 4, "Peaty".to_string())
            .await
            .unwrap();
        aggregator
            .upsert_review(&product_id, "user:bob", "Bob", 2, "Thin".to_string())
            .await
            .unwrap();

        // Alice re-reviews: her entry is rewritten, count is unchanged and
        // her review keeps its original position
        let product = aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 1, "Corked!".to_string())
            .await
            .unwrap();

        assert_eq!(product.num_of_reviews, 2);
        assert_eq!(product.reviews[0].user, "user:alice");
        assert_eq!(product.reviews[0].rating, 1);
        assert_eq!(product.reviews[0].comment, "Corked!");
        assert_eq!(product.ratings, 1.5);
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let (aggregator, _, product_id) = setup().await;

        for rating in [0u8, 6] {
            let err = aggregator
                .upsert_review(&product_id, "user:alice", "Alice", rating, "x".to_string())
                .await
                .unwrap_err();
            assert!(matches!(err, ReviewError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_missing_product_rejected() {
        let (aggregator, _, _) = setup().await;

        let err = aggregator
            .upsert_review("product:missing", "user:alice", "Alice", 3, "x".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::ProductNotFound(_)));
    }

    // ==================== Removal Tests ====================

    #[tokio::test]
    async fn test_remove_recomputes_from_remaining() {
        let (aggregator, _, product_id) = setup().await;

        aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 5, "Superb".to_string())
            .await
            .unwrap();
        let product = aggregator
            .upsert_review(&product_id, "user:bob", "Bob", 1, "Awful".to_string())
            .await
            .unwrap();
        let bob_review_id = product.reviews[1].id.clone();

        let product = aggregator
            .remove_review(&product_id, &bob_review_id)
            .await
            .unwrap();

        assert_eq!(product.num_of_reviews, 1);
        assert_eq!(product.ratings, 5.0);
    }

    #[tokio::test]
    async fn test_remove_last_review_resets_aggregates() {
        let (aggregator, _, product_id) = setup().await;

        let product = aggregator
            .upsert_review(&product_id, "user:alice", "Alice", 4, "Peaty".to_string())
            .await
            .unwrap();
        let review_id = product.reviews[0].id.clone();

        let product = aggregator
            .remove_review(&product_id, &review_id)
            .await
            .unwrap();

        assert_eq!(product.num_of_reviews, 0);
        assert_eq!(product.ratings, 0.0);
        assert!(product.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_review_rejected() {
        let (aggregator, _, product_id) = setup().await;

        let err = aggregator
            .remove_review(&product_id, "no-such-review")
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::ReviewNotFound(_)));
    }
}
