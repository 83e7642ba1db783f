//! HTTP DTOs for billing endpoints.
//!
//! JSON request/response structures forming the boundary between HTTP and
//! the application layer.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start the premium checkout flow.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after cancelled checkout.
    pub cancel_url: String,
}

/// Request to verify an Apple IAP receipt.
#[derive(Debug, Clone, Deserialize)]
pub struct AppleVerifyRequest {
    /// Base64 receipt blob from the client.
    pub receipt_data: String,
}

/// Request to verify a Google Play purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleVerifyRequest {
    /// Purchase token from the Play client.
    pub purchase_token: String,
    /// Product the token claims to cover.
    pub product_id: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response with the hosted checkout URL.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// Response after a successful receipt/purchase verification.
#[derive(Debug, Clone, Serialize)]
pub struct PremiumResponse {
    pub is_premium: bool,
}

/// Fixed acknowledgment body for webhook deliveries.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// Generic error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
