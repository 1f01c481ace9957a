//! Dram Store Server - e-commerce storefront backend
//!
//! # Architecture Overview
//!
//! The server owns the order lifecycle and inventory consistency of the
//! storefront:
//!
//! - **Catalog** (`db`): embedded SurrealDB storage for products and orders
//! - **Inventory** (`inventory`): guarded, single-statement stock deltas
//! - **Pricing** (`pricing`): pure checkout totals derivation
//! - **Orders** (`orders`): creation, fulfillment transitions, restitution
//! - **Reviews** (`reviews`): per-user review upsert and aggregate recompute
//! - **Payment** (`services::payment`): card gateway boundary
//! - **HTTP API** (`api`): axum routers and handlers
//!
//! # Module Structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # bearer-token validation, requester identity
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # database layer (models, repositories)
//! ├── inventory/     # stock adjuster
//! ├── pricing/       # checkout totals calculator
//! ├── orders/        # order lifecycle manager
//! ├── reviews/       # review aggregator
//! ├── services/      # payment gateway adapter
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod inventory;
pub mod orders;
pub mod pricing;
pub mod reviews;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState};
pub use crate::inventory::InventoryAdjuster;
pub use crate::orders::OrderLifecycleManager;
pub use crate::reviews::ReviewAggregator;
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____
   / __ \_________ _____ ___
  / / / / ___/ __ `/ __ `__ \
 / /_/ / /  / /_/ / / / / / /
/_____/_/   \__,_/_/ /_/ /_/
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    "#
    );
}
