//! Google Play purchase gateway adapter.
//!
//! The Android Publisher integration (OAuth2 service-account token exchange
//! plus `purchases.products.get`) is not wired yet; this adapter satisfies
//! the port so the rest of the reconciler is testable, and reports the
//! missing integration as a transport failure. Swap in a real gateway
//! without touching the domain verifier.

use async_trait::async_trait;

use crate::ports::{GatewayError, PurchaseGateway, PurchaseRecord};

/// Placeholder purchase gateway.
///
/// TODO: replace with an Android Publisher client once a service-account
/// OAuth2 flow is available in the dependency stack.
#[derive(Debug, Default)]
pub struct UnimplementedPurchaseGateway;

impl UnimplementedPurchaseGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PurchaseGateway for UnimplementedPurchaseGateway {
    async fn fetch_purchase(
        &self,
        _package_name: &str,
        _product_id: &str,
        _purchase_token: &str,
    ) -> Result<PurchaseRecord, GatewayError> {
        Err(GatewayError::Network(
            "google play verification requires an Android Publisher API client".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn placeholder_gateway_reports_missing_integration() {
        let gateway = UnimplementedPurchaseGateway::new();
        let result = gateway
            .fetch_purchase("com.example.taskfolio", "premium_year", "token")
            .await;
        assert!(matches!(result, Err(GatewayError::Network(_))));
    }
}
