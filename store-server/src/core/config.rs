use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::pricing::PricingConfig;
use crate::services::payment::PaymentConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/dram/store | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | FREE_SHIPPING_THRESHOLD | 200 | Items total above which shipping is free |
/// | SHIPPING_FLAT_FEE | 25 | Flat shipping fee below the threshold |
/// | TAX_RATE | 0.05 | Sales tax rate applied to the items total |
/// | PAYMENT_SECRET_KEY | (empty) | Gateway secret key |
/// | PAYMENT_PUBLISHABLE_KEY | (empty) | Gateway publishable key |
/// | JWT_SECRET | (generated) | Token validation secret |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/dram HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT validation configuration
    pub jwt: JwtConfig,
    /// Checkout pricing thresholds and rates
    pub pricing: PricingConfig,
    /// Payment gateway configuration
    pub payment: PaymentConfig,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/dram/store".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            pricing: PricingConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }

    /// Override parts of the configuration with custom values
    ///
    /// Mostly used in test scenarios.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rotated log files
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the working directory layout if it does not exist yet
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
