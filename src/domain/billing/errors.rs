//! Error types for billing and entitlement reconciliation.
//!
//! Each verification protocol gets its own error enum with HTTP status code
//! mapping. Signature and verification failures never reveal to the caller
//! which internal check failed; missing configuration is surfaced distinctly
//! (service-unavailable) so operators can tell an unset secret apart from an
//! attacker-supplied bad payload.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The webhook signing secret is not configured; the payload was never
    /// parsed.
    #[error("Webhook signing secret not configured")]
    NotConfigured,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is outside the acceptable window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required metadata field missing from the webhook event. Indicates a
    /// checkout session was created without its user association.
    #[error("Missing metadata: {0}")]
    MissingMetadata(&'static str),

    /// Applying the entitlement grant failed in the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] DomainError),
}

impl WebhookError {
    /// Maps the error to an HTTP status code.
    ///
    /// Status codes drive the sender's retry behavior: 4xx means don't
    /// retry, 5xx/503 means retry later.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            WebhookError::InvalidSignature | WebhookError::TimestampOutOfRange => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingMetadata(_) => StatusCode::BAD_REQUEST,
            WebhookError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the sender should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::NotConfigured | WebhookError::Store(_))
    }
}

/// Errors that occur while verifying a receipt or purchase with its
/// issuing authority.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The feature's credentials are not configured; no outbound call was
    /// made.
    #[error("Verification not configured")]
    NotConfigured,

    /// The authority conclusively rejected the receipt/purchase. The
    /// authority's status code is preserved for diagnostics when one was
    /// returned; `None` means every endpoint was exhausted without a
    /// conclusive answer.
    #[error("Verification failed (status {status:?})")]
    VerificationFailed { status: Option<i32> },

    /// Transient transport failure with no fallback remaining.
    #[error("Network failure: {0}")]
    Network(String),

    /// Applying the entitlement grant failed in the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] DomainError),
}

impl VerifyError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerifyError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            VerifyError::VerificationFailed { .. } => StatusCode::BAD_REQUEST,
            VerifyError::Network(_) => StatusCode::BAD_GATEWAY,
            VerifyError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
