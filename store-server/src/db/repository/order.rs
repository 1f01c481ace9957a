//! Order Repository
//!
//! Persistence for order records. Lifecycle rules (status chain, stock
//! restitution) live in the order lifecycle manager; this layer only reads
//! and writes.

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::{Order, OrderCreate};
use chrono::{DateTime, Utc};
use shared::order::OrderStatus;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = record_id(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// All orders owned by a user, oldest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user")
            .bind(("user", user_id.to_string()))
            .await?
            .take(0)?;
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// All orders (admin listing), oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE true")
            .await?
            .take(0)?;
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    /// Write the fulfillment status (and delivery timestamp, when set)
    pub async fn update_status(
        &self,
        id: &str,
        status: OrderStatus,
        delivered_at: Option<DateTime<Utc>>,
    ) -> RepoResult<Order> {
        let rid = record_id(ORDER_TABLE, id);
        let status_value =
            serde_json::to_value(status).map_err(|e| RepoError::Database(e.to_string()))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $id SET order_status = $status, delivered_at = $delivered_at \
                 RETURN AFTER",
            )
            .bind(("id", rid))
            .bind(("status", status_value))
            .bind(("delivered_at", delivered_at))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        orders
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Hard delete an order record
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = record_id(ORDER_TABLE, id);
        let result: Option<Order> = self.base.db().delete(rid).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Order {} not found", id)));
        }
        Ok(())
    }
}
