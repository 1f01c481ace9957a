//! Payment Gateway Adapter
//!
//! Boundary to the external card-processing service. The server only creates
//! payment intents; confirmation happens client-side and the resulting
//! `{transaction_id, status}` comes back attached to the checkout request.
//!
//! Intent creation is never retried: a duplicate attempt could charge the
//! card twice. Only idempotent status checks would be safe to retry.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::utils::AppError;

/// Payment gateway configuration
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Gateway secret key (server-side API calls)
    pub secret_key: String,
    /// Gateway publishable key (handed to the storefront for confirmation)
    pub publishable_key: String,
    /// ISO currency code charged at checkout
    pub currency: String,
    /// Gateway API base URL
    pub api_base: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            secret_key: std::env::var("PAYMENT_SECRET_KEY").unwrap_or_default(),
            publishable_key: std::env::var("PAYMENT_PUBLISHABLE_KEY").unwrap_or_default(),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".into()),
            api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
        }
    }
}

/// Newly created payment intent
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    /// Gateway intent id
    pub id: String,
    /// Client secret the storefront uses to confirm the payment
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment gateway unreachable: {0}")]
    Transport(String),

    #[error("Payment gateway rejected the request ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed payment gateway response: {0}")]
    MalformedResponse(String),
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        AppError::UpstreamPayment(err.to_string())
    }
}

/// Card payment service boundary
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount_minor` (smallest currency unit)
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError>;
}

// =============================================================================
// Stripe
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeIntentResponse {
    id: String,
    client_secret: String,
}

/// Stripe-backed gateway
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl StripeGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let url = format!("{}/v1/payment_intents", self.config.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&[
                ("amount", amount_minor.to_string()),
                ("currency", currency.to_string()),
                ("metadata[integration_check]", "accept_a_payment".to_string()),
            ])
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let intent: StripeIntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::MalformedResponse(e.to_string()))?;

        tracing::info!(intent = %intent.id, amount_minor, "Payment intent created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }
}

// =============================================================================
// Mock (tests and local development without gateway credentials)
// =============================================================================

/// In-process gateway stand-in
#[derive(Debug, Default)]
pub struct MockGateway {
    /// When set, every call fails like a gateway outage
    pub fail: bool,
    counter: AtomicU64,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            counter: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_payment_intent(
        &self,
        _amount_minor: i64,
        _currency: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.fail {
            return Err(PaymentError::Upstream {
                status: 402,
                message: "card_declined".to_string(),
            });
        }
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(PaymentIntent {
            id: format!("pi_mock_{:06}", n),
            client_secret: format!("pi_mock_{:06}_secret", n),
        })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_gateway_mints_distinct_intents() {
        let gateway = MockGateway::new();

        let first = gateway.create_payment_intent(12_990, "usd").await.unwrap();
        let second = gateway.create_payment_intent(12_990, "usd").await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.client_secret.contains(&first.id));
    }

    #[tokio::test]
    async fn test_mock_gateway_failure_is_upstream_error() {
        let gateway = MockGateway::failing();

        let err = gateway
            .create_payment_intent(12_990, "usd")
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::Upstream { status: 402, .. }));
    }
}
