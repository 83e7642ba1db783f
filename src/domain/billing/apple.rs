//! Apple receipt verification protocol.
//!
//! Receipts are checked against Apple's `verifyReceipt` API, trying the
//! production endpoint first and the sandbox endpoint second. The order is
//! load-bearing: status 21007 ("sandbox receipt sent to production") is an
//! inconclusive answer that advances to the next endpoint, not a rejection.
//! Network failure on one endpoint is likewise non-fatal; a conclusive
//! rejection stops immediately with Apple's status code preserved.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::ports::{ReceiptGateway, ReceiptVerifyRequest};

use super::errors::VerifyError;

/// Apple production verification endpoint.
pub const PRODUCTION_VERIFY_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";

/// Apple sandbox verification endpoint.
pub const SANDBOX_VERIFY_URL: &str = "https://sandbox.itunes.apple.com/verifyReceipt";

/// Receipt is valid.
const STATUS_OK: i32 = 0;

/// Sandbox receipt was sent to the production endpoint; retry on sandbox.
const STATUS_SANDBOX_RECEIPT: i32 = 21007;

/// Verifies Apple receipts through an ordered list of endpoints.
pub struct AppleReceiptVerifier {
    shared_secret: Option<SecretString>,
    gateway: Arc<dyn ReceiptGateway>,
    /// Ordered verification endpoints; first conclusive answer wins.
    endpoints: Vec<String>,
}

impl AppleReceiptVerifier {
    /// Creates a verifier with the standard production-then-sandbox order.
    ///
    /// An absent (or empty) shared secret leaves the verifier unconfigured;
    /// every call then fails with [`VerifyError::NotConfigured`] before any
    /// outbound request.
    pub fn new(shared_secret: Option<SecretString>, gateway: Arc<dyn ReceiptGateway>) -> Self {
        Self {
            shared_secret: shared_secret.filter(|s| !s.expose_secret().is_empty()),
            gateway,
            endpoints: vec![
                PRODUCTION_VERIFY_URL.to_string(),
                SANDBOX_VERIFY_URL.to_string(),
            ],
        }
    }

    /// Replaces the endpoint list. Used by tests to point each probe at a
    /// scripted authority.
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Verifies a receipt blob with the issuing authority.
    ///
    /// Returns `Ok(())` when some endpoint conclusively accepts the receipt
    /// (status 0 with at least one in-app purchase entry).
    pub async fn verify(&self, receipt_data: &str) -> Result<(), VerifyError> {
        let secret = self
            .shared_secret
            .as_ref()
            .ok_or(VerifyError::NotConfigured)?;

        let request = ReceiptVerifyRequest {
            receipt_data: receipt_data.to_string(),
            password: secret.expose_secret().clone(),
        };

        for endpoint in &self.endpoints {
            let response = match self.gateway.verify_receipt(endpoint, &request).await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!(%endpoint, error = %err, "receipt endpoint unreachable, trying next");
                    continue;
                }
            };

            if response.status == STATUS_SANDBOX_RECEIPT {
                tracing::debug!(%endpoint, "sandbox receipt on production endpoint, trying next");
                continue;
            }

            if response.status == STATUS_OK && !response.receipt.in_app.is_empty() {
                return Ok(());
            }

            // Any other status is a conclusive rejection, including a
            // status-0 receipt with no in-app entries.
            return Err(VerifyError::VerificationFailed {
                status: Some(response.status),
            });
        }

        Err(VerifyError::VerificationFailed { status: None })
    }
}
