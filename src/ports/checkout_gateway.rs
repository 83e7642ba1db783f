//! Checkout gateway port.
//!
//! Contract for creating a hosted payment-processor checkout session. The
//! session must carry the user id as metadata; the webhook path later reads
//! it back to know which user to grant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Failures from the checkout gateway.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Transport-level failure reaching the processor.
    #[error("Network failure: {0}")]
    Network(String),

    /// The processor rejected the request.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCheckoutRequest {
    /// The authenticated user; attached to the session as metadata.
    pub user_id: UserId,

    /// Where the processor redirects after successful payment.
    pub success_url: String,

    /// Where the processor redirects on cancel.
    pub cancel_url: String,
}

/// A created checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    /// Hosted payment page URL for the client to open.
    pub url: String,
}

/// Port for creating checkout sessions with the payment processor.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Creates a one-time-payment checkout session for the premium upgrade.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError>;
}
