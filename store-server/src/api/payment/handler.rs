//! Payment API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Intent creation request; amount in the smallest currency unit
#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct ProcessPaymentResponse {
    pub client_secret: String,
}

/// Create a payment intent for the checkout amount
pub async fn process(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<ProcessPaymentRequest>,
) -> AppResult<Json<ProcessPaymentResponse>> {
    if payload.amount <= 0 {
        return Err(AppError::Validation(
            "Payment amount must be positive".to_string(),
        ));
    }
    let intent = state
        .payment
        .create_payment_intent(payload.amount, &state.config.payment.currency)
        .await?;
    Ok(Json(ProcessPaymentResponse {
        client_secret: intent.client_secret,
    }))
}

/// Publishable key for client-side confirmation
pub async fn publishable_key(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "publishable_key": state.config.payment.publishable_key,
    }))
}
