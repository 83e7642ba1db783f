//! Google Play purchase verification protocol.
//!
//! Verification needs a package name and service-account credentials; with
//! either missing the feature is disabled and every call fails fast with
//! `NotConfigured`. The actual Android Publisher API call lives behind the
//! `PurchaseGateway` port.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::ports::PurchaseGateway;

use super::errors::VerifyError;

/// Verifies Google Play purchase tokens.
pub struct GooglePurchaseVerifier {
    package_name: Option<String>,
    service_account_json: Option<SecretString>,
    gateway: Arc<dyn PurchaseGateway>,
}

impl GooglePurchaseVerifier {
    /// Creates a verifier. Empty package name or credentials leave it
    /// unconfigured.
    pub fn new(
        package_name: Option<String>,
        service_account_json: Option<SecretString>,
        gateway: Arc<dyn PurchaseGateway>,
    ) -> Self {
        Self {
            package_name: package_name.filter(|p| !p.is_empty()),
            service_account_json: service_account_json
                .filter(|s| !s.expose_secret().is_empty()),
            gateway,
        }
    }

    /// Verifies that the purchase token identifies a paid purchase of
    /// `product_id`.
    pub async fn verify(&self, purchase_token: &str, product_id: &str) -> Result<(), VerifyError> {
        let package_name = self
            .package_name
            .as_deref()
            .filter(|_| self.service_account_json.is_some())
            .ok_or(VerifyError::NotConfigured)?;

        let record = self
            .gateway
            .fetch_purchase(package_name, product_id, purchase_token)
            .await
            .map_err(|e| VerifyError::Network(e.to_string()))?;

        if record.is_purchased() {
            Ok(())
        } else {
            Err(VerifyError::VerificationFailed {
                status: Some(record.purchase_state),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GatewayError, PurchaseRecord};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedGateway {
        response: Result<PurchaseRecord, GatewayError>,
        calls: AtomicU32,
    }

    impl ScriptedGateway {
        fn new(response: Result<PurchaseRecord, GatewayError>) -> Self {
            Self {
                response,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl PurchaseGateway for ScriptedGateway {
        async fn fetch_purchase(
            &self,
            _package_name: &str,
            _product_id: &str,
            _purchase_token: &str,
        ) -> Result<PurchaseRecord, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone()
        }
    }

    fn purchased() -> PurchaseRecord {
        PurchaseRecord {
            purchase_state: 0,
            acknowledgement_state: 1,
        }
    }

    fn configured(gateway: Arc<ScriptedGateway>) -> GooglePurchaseVerifier {
        GooglePurchaseVerifier::new(
            Some("com.example.taskfolio".to_string()),
            Some(SecretString::new("{\"type\":\"service_account\"}".to_string())),
            gateway,
        )
    }

    #[tokio::test]
    async fn purchased_record_verifies() {
        let gateway = Arc::new(ScriptedGateway::new(Ok(purchased())));
        let result = configured(gateway).verify("token", "premium_year").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cancelled_purchase_is_rejected_with_state() {
        let gateway = Arc::new(ScriptedGateway::new(Ok(PurchaseRecord {
            purchase_state: 1,
            acknowledgement_state: 0,
        })));
        let result = configured(gateway).verify("token", "premium_year").await;

        assert!(matches!(
            result,
            Err(VerifyError::VerificationFailed { status: Some(1) })
        ));
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_as_network_error() {
        let gateway = Arc::new(ScriptedGateway::new(Err(GatewayError::Network(
            "androidpublisher unreachable".to_string(),
        ))));
        let result = configured(gateway).verify("token", "premium_year").await;

        assert!(matches!(result, Err(VerifyError::Network(_))));
    }

    #[tokio::test]
    async fn missing_package_name_is_not_configured() {
        let gateway = Arc::new(ScriptedGateway::new(Ok(purchased())));
        let verifier = GooglePurchaseVerifier::new(
            None,
            Some(SecretString::new("{}".to_string())),
            gateway.clone(),
        );

        let result = verifier.verify("token", "premium_year").await;

        assert!(matches!(result, Err(VerifyError::NotConfigured)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credentials_is_not_configured() {
        let gateway = Arc::new(ScriptedGateway::new(Ok(purchased())));
        let verifier = GooglePurchaseVerifier::new(
            Some("com.example.taskfolio".to_string()),
            None,
            gateway.clone(),
        );

        let result = verifier.verify("token", "premium_year").await;

        assert!(matches!(result, Err(VerifyError::NotConfigured)));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }
}
