//! HTTP handlers for billing endpoints.
//!
//! The webhook handler receives the raw body bytes untouched (the signature
//! covers them) and never requires a user bearer token; everything else goes
//! through `RequireAuth`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::billing::{
    CreateCheckoutCommand, CreateCheckoutHandler, HandleStripeWebhookCommand,
    HandleStripeWebhookHandler, VerifyAppleReceiptCommand, VerifyAppleReceiptHandler,
    VerifyGooglePurchaseCommand, VerifyGooglePurchaseHandler,
};

use super::dto::{
    AppleVerifyRequest, CheckoutRequest, CheckoutResponse, ErrorResponse, GoogleVerifyRequest,
    PremiumResponse, WebhookAck,
};

/// Header carrying the payment processor's signature.
const STRIPE_SIGNATURE_HEADER: &str = "Stripe-Signature";

/// Shared state for billing endpoints.
#[derive(Clone)]
pub struct BillingAppState {
    pub webhook: Arc<HandleStripeWebhookHandler>,
    pub apple: Arc<VerifyAppleReceiptHandler>,
    pub google: Arc<VerifyGooglePurchaseHandler>,
    pub checkout: Arc<CreateCheckoutHandler>,
}

/// `POST /webhooks/stripe` - payment-processor webhook deliveries.
pub async fn stripe_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let command = HandleStripeWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match state.webhook.handle(command, Utc::now()).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "webhook acknowledged");
            (StatusCode::OK, Json(WebhookAck { received: true })).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "webhook rejected");
            (
                err.status_code(),
                Json(ErrorResponse::new("WEBHOOK_ERROR", err.to_string())),
            )
                .into_response()
        }
    }
}

/// `POST /billing/checkout` - create the premium checkout session.
pub async fn create_checkout(
    State(state): State<BillingAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Response {
    let command = CreateCheckoutCommand {
        user_id: identity.user_id,
        success_url: request.success_url,
        cancel_url: request.cancel_url,
    };

    match state.checkout.handle(command).await {
        Ok(result) => (StatusCode::OK, Json(CheckoutResponse { url: result.url })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "checkout creation failed");
            (
                err.status_code(),
                Json(ErrorResponse::new("CHECKOUT_ERROR", err.to_string())),
            )
                .into_response()
        }
    }
}

/// `POST /billing/apple/verify` - verify an Apple receipt and grant premium.
pub async fn apple_verify(
    State(state): State<BillingAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<AppleVerifyRequest>,
) -> Response {
    let command = VerifyAppleReceiptCommand {
        user_id: identity.user_id,
        receipt_data: request.receipt_data,
    };

    match state.apple.handle(command, Utc::now()).await {
        Ok(()) => (StatusCode::OK, Json(PremiumResponse { is_premium: true })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "apple receipt rejected");
            (
                err.status_code(),
                Json(ErrorResponse::new("RECEIPT_INVALID", "invalid receipt")),
            )
                .into_response()
        }
    }
}

/// `POST /billing/google/verify` - verify a Play purchase and grant premium.
pub async fn google_verify(
    State(state): State<BillingAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<GoogleVerifyRequest>,
) -> Response {
    let command = VerifyGooglePurchaseCommand {
        user_id: identity.user_id,
        purchase_token: request.purchase_token,
        product_id: request.product_id,
    };

    match state.google.handle(command, Utc::now()).await {
        Ok(()) => (StatusCode::OK, Json(PremiumResponse { is_premium: true })).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "google purchase rejected");
            (
                err.status_code(),
                Json(ErrorResponse::new("PURCHASE_INVALID", "invalid purchase")),
            )
                .into_response()
        }
    }
}
