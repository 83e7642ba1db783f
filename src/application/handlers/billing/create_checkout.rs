//! CreateCheckoutHandler - Command handler for starting the premium checkout.
//!
//! The created session carries the authenticated user's id as metadata; the
//! webhook path reads it back when the processor reports completion.

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::ports::{CheckoutError, CheckoutGateway, CreateCheckoutRequest};

/// Command to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutCommand {
    pub user_id: UserId,
    pub success_url: String,
    pub cancel_url: String,
}

/// Result of creating a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    /// Hosted payment page URL for the client to open.
    pub url: String,
}

/// Failures creating a checkout session.
#[derive(Debug, Error)]
pub enum CreateCheckoutError {
    /// Stripe key or price id not configured; the feature is disabled.
    #[error("Checkout not configured")]
    NotConfigured,

    /// The gateway call failed.
    #[error(transparent)]
    Gateway(#[from] CheckoutError),
}

impl CreateCheckoutError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CreateCheckoutError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            CreateCheckoutError::Gateway(CheckoutError::Network(_)) => StatusCode::BAD_GATEWAY,
            CreateCheckoutError::Gateway(CheckoutError::Provider(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Handler for creating checkout sessions.
pub struct CreateCheckoutHandler {
    /// Present only when the Stripe key and price id are configured.
    gateway: Option<Arc<dyn CheckoutGateway>>,
}

impl CreateCheckoutHandler {
    pub fn new(gateway: Option<Arc<dyn CheckoutGateway>>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, CreateCheckoutError> {
        let gateway = self
            .gateway
            .as_ref()
            .ok_or(CreateCheckoutError::NotConfigured)?;

        let session = gateway
            .create_checkout_session(CreateCheckoutRequest {
                user_id: cmd.user_id,
                success_url: cmd.success_url,
                cancel_url: cmd.cancel_url,
            })
            .await?;

        Ok(CreateCheckoutResult { url: session.url })
    }
}
