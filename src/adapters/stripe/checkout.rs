//! Stripe checkout gateway adapter.
//!
//! Implements the `CheckoutGateway` port against the Stripe API. Sessions
//! are created in one-time-payment mode and carry `metadata[user_id]` so the
//! webhook path can associate the completed payment with a user.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{CheckoutError, CheckoutGateway, CheckoutSession, CreateCheckoutRequest};

/// Stripe API configuration for checkout session creation.
#[derive(Clone)]
pub struct StripeCheckoutConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Price id for the one-time premium purchase.
    price_id: String,

    /// Base URL for the Stripe API (overridable for tests).
    api_base_url: String,
}

impl StripeCheckoutConfig {
    pub fn new(api_key: SecretString, price_id: impl Into<String>) -> Self {
        Self {
            api_key,
            price_id: price_id.into(),
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Minimal view of Stripe's checkout session response.
#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    url: String,
}

/// Stripe implementation of the checkout gateway.
pub struct StripeCheckoutGateway {
    config: StripeCheckoutConfig,
    http_client: reqwest::Client,
}

impl StripeCheckoutGateway {
    pub fn new(config: StripeCheckoutConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client construction only fails on TLS misconfiguration");

        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let params = [
            ("mode", "payment".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[user_id]", request.user_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "stripe checkout session creation failed");
            return Err(CheckoutError::Provider(format!(
                "Stripe API error ({}): {}",
                status, body
            )));
        }

        let session: StripeSessionResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::Provider(format!("unexpected response shape: {}", e)))?;

        Ok(CheckoutSession { url: session.url })
    }
}
