//! VerifyAppleReceiptHandler - Command handler for Apple IAP receipts.
//!
//! Verifies the receipt with Apple and, on success, applies the fixed
//! premium grant to the authenticated user.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::billing::{AppleReceiptVerifier, PremiumGrant, VerifyError};
use crate::domain::foundation::UserId;
use crate::ports::UserStore;

/// Command to verify a receipt for the authenticated user.
#[derive(Debug, Clone)]
pub struct VerifyAppleReceiptCommand {
    /// The authenticated caller; receipts always grant to the caller.
    pub user_id: UserId,
    /// Base64 receipt blob from the client.
    pub receipt_data: String,
}

/// Handler for Apple receipt verification.
pub struct VerifyAppleReceiptHandler {
    verifier: Arc<AppleReceiptVerifier>,
    users: Arc<dyn UserStore>,
}

impl VerifyAppleReceiptHandler {
    pub fn new(verifier: Arc<AppleReceiptVerifier>, users: Arc<dyn UserStore>) -> Self {
        Self { verifier, users }
    }

    /// Verifies the receipt and applies the premium grant.
    ///
    /// The grant is anchored at `now`: receipts carry no event id, so
    /// re-verification recomputes the same fixed window rather than
    /// accumulating duration.
    pub async fn handle(
        &self,
        cmd: VerifyAppleReceiptCommand,
        now: DateTime<Utc>,
    ) -> Result<(), VerifyError> {
        self.verifier.verify(&cmd.receipt_data).await?;

        let grant = PremiumGrant::starting_at(now);
        self.users.grant_premium(&cmd.user_id, &grant, None).await?;

        tracing::info!(user_id = %cmd.user_id, "premium granted via apple receipt");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use crate::ports::{
        GatewayError, ReceiptGateway, ReceiptVerifyRequest, ReceiptVerifyResponse,
    };
    use async_trait::async_trait;
    use chrono::Duration;
    use secrecy::SecretString;

    struct FixedGateway {
        response: Result<ReceiptVerifyResponse, GatewayError>,
    }

    #[async_trait]
    impl ReceiptGateway for FixedGateway {
        async fn verify_receipt(
            &self,
            _endpoint: &str,
            _request: &ReceiptVerifyRequest,
        ) -> Result<ReceiptVerifyResponse, GatewayError> {
            self.response.clone()
        }
    }

    fn valid_response() -> ReceiptVerifyResponse {
        serde_json::from_value(serde_json::json!({
            "status": 0,
            "receipt": { "in_app": [ { "product_id": "premium_year" } ] }
        }))
        .unwrap()
    }

    fn handler_with(
        response: Result<ReceiptVerifyResponse, GatewayError>,
        store: Arc<InMemoryUserStore>,
    ) -> VerifyAppleReceiptHandler {
        let verifier = AppleReceiptVerifier::new(
            Some(SecretString::new("shared-secret".to_string())),
            Arc::new(FixedGateway { response }),
        );
        VerifyAppleReceiptHandler::new(Arc::new(verifier), store)
    }

    fn command() -> VerifyAppleReceiptCommand {
        VerifyAppleReceiptCommand {
            user_id: UserId::new("u1").unwrap(),
            receipt_data: "base64-receipt".to_string(),
        }
    }

    #[tokio::test]
    async fn valid_receipt_grants_premium_for_a_year() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");
        let now = Utc::now();

        handler_with(Ok(valid_response()), store.clone())
            .handle(command(), now)
            .await
            .unwrap();

        let record = store.get("u1").unwrap();
        assert!(record.is_premium);
        let expected = now + Duration::days(365);
        assert!((record.premium_expires_at.unwrap() - expected)
            .num_seconds()
            .abs() < 5);
    }

    #[tokio::test]
    async fn rejected_receipt_leaves_store_untouched() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");
        let rejection: ReceiptVerifyResponse =
            serde_json::from_value(serde_json::json!({ "status": 21003 })).unwrap();

        let result = handler_with(Ok(rejection), store.clone())
            .handle(command(), Utc::now())
            .await;

        assert!(matches!(
            result,
            Err(VerifyError::VerificationFailed { status: Some(21003) })
        ));
        assert!(!store.get("u1").unwrap().is_premium);
        assert_eq!(store.grant_calls(), 0);
    }
}
