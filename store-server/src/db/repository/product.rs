//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Product, ProductCreate, ProductUpdate, Review};
use rust_decimal::Decimal;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Catalog query parameters (keyword search, filters, paging)
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f64>,
    pub page: u32,
    pub per_page: u32,
}

/// One page of catalog results plus the counts the storefront needs to
/// render pagination
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub products_count: i64,
    pub filtered_count: i64,
    pub res_per_page: u32,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

// =============================================================================
// Product Repository
// =============================================================================

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products (admin listing)
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let rid = record_id(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select(rid).await?;
        Ok(product)
    }

    /// Total number of products in the catalog
    pub async fn count_all(&self) -> RepoResult<i64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.into_iter().next().map(|r| r.count).unwrap_or(0))
    }

    /// Catalog query: keyword search, category/price/rating filters, paging
    pub async fn query(&self, q: CatalogQuery) -> RepoResult<CatalogPage> {
        let per_page = q.per_page.max(1);
        let page = q.page.max(1);

        // Build the WHERE clause from the provided filters, binding each value
        let mut where_parts: Vec<&str> = Vec::new();
        if q.keyword.is_some() {
            where_parts.push("string::lowercase(name) CONTAINS string::lowercase($keyword)");
        }
        if q.category.is_some() {
            where_parts.push("category = $category");
        }
        if q.min_price.is_some() {
            where_parts.push("price >= $min_price");
        }
        if q.max_price.is_some() {
            where_parts.push("price <= $max_price");
        }
        if q.min_rating.is_some() {
            where_parts.push("ratings >= $min_rating");
        }

        let where_clause = if where_parts.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", where_parts.join(" AND "))
        };

        let count_query = format!("SELECT count() AS count FROM product{} GROUP ALL", where_clause);
        // LIMIT/START are server-computed numbers, inlined rather than bound
        let page_query = format!(
            "SELECT * FROM product{} ORDER BY created_at DESC LIMIT {} START {}",
            where_clause,
            per_page,
            (page - 1) * per_page
        );

        fn bind_filters<'a>(
            q: &CatalogQuery,
            mut query: surrealdb::method::Query<'a, Db>,
        ) -> surrealdb::method::Query<'a, Db> {
            if let Some(v) = q.keyword.clone() {
                query = query.bind(("keyword", v));
            }
            if let Some(v) = q.category.clone() {
                query = query.bind(("category", v));
            }
            if let Some(v) = q.min_price {
                query = query.bind(("min_price", v));
            }
            if let Some(v) = q.max_price {
                query = query.bind(("max_price", v));
            }
            if let Some(v) = q.min_rating {
                query = query.bind(("min_rating", v));
            }
            query
        }

        let rows: Vec<CountRow> = bind_filters(&q, self.base.db().query(&count_query))
            .await?
            .take(0)?;
        let filtered_count = rows.into_iter().next().map(|r| r.count).unwrap_or(0);

        let products: Vec<Product> = bind_filters(&q, self.base.db().query(&page_query))
            .await?
            .take(0)?;

        let products_count = self.count_all().await?;

        Ok(CatalogPage {
            products,
            products_count,
            filtered_count,
            res_per_page: per_page,
        })
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate, owner: &str) -> RepoResult<Product> {
        if data.price < Decimal::ZERO {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        if data.stock < 0 {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }

        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            strength: data.strength,
            volume: data.volume,
            category: data.category,
            stock: data.stock,
            ratings: 0.0,
            num_of_reviews: 0,
            images: data.images.unwrap_or_default(),
            reviews: Vec::new(),
            user: owner.to_string(),
            created_at: chrono::Utc::now(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product (full validation path; stock changes of live orders
    /// go through `adjust_stock` instead)
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let rid = record_id(PRODUCT_TABLE, id);

        if let Some(price) = data.price
            && price < Decimal::ZERO
        {
            return Err(RepoError::Validation("price cannot be negative".into()));
        }
        if let Some(stock) = data.stock
            && stock < 0
        {
            return Err(RepoError::Validation("stock cannot be negative".into()));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.strength.is_some() {
            set_parts.push("strength = $strength");
        }
        if data.volume.is_some() {
            set_parts.push("volume = $volume");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }
        if data.images.is_some() {
            set_parts.push("images = $images");
        }

        if set_parts.is_empty() {
            // No fields to update
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!("UPDATE $product SET {} RETURN AFTER", set_parts.join(", "));

        let mut query = self.base.db().query(&query_str).bind(("product", rid));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.strength {
            query = query.bind(("strength", v));
        }
        if let Some(v) = data.volume {
            query = query.bind(("volume", v));
        }
        if let Some(v) = data.category {
            // embedded enum, bind as JSON value
            query = query.bind(("category", serde_json::to_value(&v).unwrap_or_default()));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }
        if let Some(v) = data.images {
            query = query.bind(("images", serde_json::to_value(&v).unwrap_or_default()));
        }

        let mut result = query.await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = record_id(PRODUCT_TABLE, id);
        let result: Option<Product> = self.base.db().delete(rid).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Apply a signed stock delta as a single conditional statement
    ///
    /// Only the stock field is written; no other validation runs. The guard
    /// `stock + delta >= 0` is evaluated atomically by the database, so two
    /// concurrent checkouts cannot both take the last unit. Returns `None`
    /// when the record is missing or the guard rejects the delta.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> RepoResult<Option<Product>> {
        let rid = record_id(PRODUCT_TABLE, id);
        let mut result = self
            .base
            .db()
            .query("UPDATE $product SET stock += $delta WHERE stock + $delta >= 0 RETURN AFTER")
            .bind(("product", rid))
            .bind(("delta", delta))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Replace the review collection and its derived aggregates in one write
    ///
    /// Only review fields are touched; full record validation does not apply.
    pub async fn set_reviews(
        &self,
        id: &str,
        reviews: &[Review],
        ratings: f64,
        num_of_reviews: u32,
    ) -> RepoResult<Product> {
        let rid = record_id(PRODUCT_TABLE, id);
        let reviews_value =
            serde_json::to_value(reviews).map_err(|e| RepoError::Database(e.to_string()))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $product SET reviews = $reviews, ratings = $ratings, \
                 num_of_reviews = $num_of_reviews RETURN AFTER",
            )
            .bind(("product", rid))
            .bind(("reviews", reviews_value))
            .bind(("ratings", ratings))
            .bind(("num_of_reviews", num_of_reviews as i64))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }
}
