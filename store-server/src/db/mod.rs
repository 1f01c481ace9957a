//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed on disk for the server binary, pure
//! in-memory engine for tests.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "dram";
const DATABASE: &str = "store";

/// Database service — owns the embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;
        tracing::info!(path = %db_path, "Database opened (embedded, RocksDB)");
        Ok(Self { db })
    }

    /// Open a throwaway in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;
        Ok(Self { db })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");

        let service = DbService::open(&path.to_string_lossy()).await.unwrap();
        service
            .db
            .query("CREATE product:probe SET name = 'probe'")
            .await
            .unwrap();
    }
}
