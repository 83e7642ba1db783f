//! Receipt verification gateway port.
//!
//! Capability interface for the outbound call to Apple's `verifyReceipt`
//! endpoints. The domain decides *which* endpoint to call and *how to
//! interpret* the response; the gateway only moves bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failures from a verification gateway.
///
/// These are never conclusive: a network error on one endpoint advances to
/// the next fallback where one exists.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Connection, timeout, or non-HTTP-level transport failure.
    #[error("Network failure: {0}")]
    Network(String),

    /// The authority answered with something that does not parse.
    #[error("Malformed authority response: {0}")]
    MalformedResponse(String),
}

/// Request body for Apple's `verifyReceipt` API.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptVerifyRequest {
    /// Base64 receipt blob as received from the client.
    #[serde(rename = "receipt-data")]
    pub receipt_data: String,

    /// The app's shared secret.
    pub password: String,
}

/// Response body from Apple's `verifyReceipt` API, reduced to the fields
/// this service interprets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptVerifyResponse {
    /// Apple status code. 0 is success; 21007 means "sandbox receipt sent
    /// to production".
    pub status: i32,

    /// Decoded receipt, present on success.
    #[serde(default)]
    pub receipt: ReceiptBody,
}

/// Decoded receipt contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptBody {
    /// In-app purchase entries.
    #[serde(default)]
    pub in_app: Vec<InAppPurchase>,
}

/// A single in-app purchase entry.
#[derive(Debug, Clone, Deserialize)]
pub struct InAppPurchase {
    #[serde(default)]
    pub product_id: String,
}

/// Port for posting a receipt to a verification endpoint.
#[async_trait]
pub trait ReceiptGateway: Send + Sync {
    /// POSTs the verification request to `endpoint` and returns the parsed
    /// response. Implementations must bound the call with a timeout; a
    /// timed-out call is a `Network` error.
    async fn verify_receipt(
        &self,
        endpoint: &str,
        request: &ReceiptVerifyRequest,
    ) -> Result<ReceiptVerifyResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_apple_success_shape() {
        let json = serde_json::json!({
            "status": 0,
            "receipt": { "in_app": [ { "product_id": "premium_year" } ] }
        });

        let response: ReceiptVerifyResponse = serde_json::from_value(json).unwrap();

        assert_eq!(response.status, 0);
        assert_eq!(response.receipt.in_app.len(), 1);
        assert_eq!(response.receipt.in_app[0].product_id, "premium_year");
    }

    #[test]
    fn response_without_receipt_defaults_to_empty() {
        let response: ReceiptVerifyResponse =
            serde_json::from_value(serde_json::json!({ "status": 21007 })).unwrap();

        assert_eq!(response.status, 21007);
        assert!(response.receipt.in_app.is_empty());
    }

    #[test]
    fn request_serializes_with_apple_field_names() {
        let request = ReceiptVerifyRequest {
            receipt_data: "base64-blob".to_string(),
            password: "shared-secret".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["receipt-data"], "base64-blob");
        assert_eq!(json["password"], "shared-secret");
    }
}
