//! Apple receipt gateway adapter.
//!
//! Implements the `ReceiptGateway` port with a plain JSON POST. Which
//! endpoint to call and how to interpret the response is the domain
//! verifier's business; this adapter only moves bytes with a bounded
//! timeout.

use async_trait::async_trait;
use std::time::Duration;

use crate::ports::{GatewayError, ReceiptGateway, ReceiptVerifyRequest, ReceiptVerifyResponse};

/// HTTP implementation of the receipt gateway.
pub struct HttpReceiptGateway {
    http_client: reqwest::Client,
}

impl HttpReceiptGateway {
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client construction only fails on TLS misconfiguration");

        Self { http_client }
    }
}

impl Default for HttpReceiptGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReceiptGateway for HttpReceiptGateway {
    async fn verify_receipt(
        &self,
        endpoint: &str,
        request: &ReceiptVerifyRequest,
    ) -> Result<ReceiptVerifyResponse, GatewayError> {
        let response = self
            .http_client
            .post(endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
    }
}
