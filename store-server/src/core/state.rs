//! Server state

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{PaymentGateway, StripeGateway};

/// Shared server state - one handle per service, cheap to clone
///
/// | Field | Description |
/// |-------|-------------|
/// | config | immutable configuration |
/// | db | embedded database handle |
/// | jwt_service | bearer-token validation |
/// | payment | card payment gateway boundary |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub payment: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("db", &"<Surreal>")
            .field("payment", &"<PaymentGateway>")
            .finish()
    }
}

impl ServerState {
    /// Assemble state from pre-built parts (tests swap in the in-memory
    /// database and the mock gateway here)
    pub fn new(config: Config, db: Surreal<Db>, payment: Arc<dyn PaymentGateway>) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            db,
            jwt_service,
            payment,
        }
    }

    /// Initialize production state
    ///
    /// 1. working directory layout (database, logs)
    /// 2. embedded database at `work_dir/database/store.db`
    /// 3. payment gateway client
    ///
    /// # Panics
    ///
    /// Panics when the working directory or the database cannot be opened;
    /// the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("store.db");
        let db_service = DbService::open(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let payment: Arc<dyn PaymentGateway> =
            Arc::new(StripeGateway::new(config.payment.clone()));

        Self::new(config.clone(), db_service.db, payment)
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
