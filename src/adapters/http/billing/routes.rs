//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    apple_verify, create_checkout, google_verify, stripe_webhook, BillingAppState,
};

/// User-facing billing routes (require authentication).
///
/// - `POST /checkout` - Start the premium checkout flow
/// - `POST /apple/verify` - Verify an Apple IAP receipt
/// - `POST /google/verify` - Verify a Google Play purchase
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/apple/verify", post(apple_verify))
        .route("/google/verify", post(google_verify))
}

/// Webhook routes.
///
/// Separate from the user-facing routes because webhook deliveries carry no
/// user bearer token; they are authenticated by signature instead.
///
/// - `POST /stripe` - Payment-processor webhook deliveries
pub fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/stripe", post(stripe_webhook))
}

/// Complete billing module router, suitable for nesting under `/api`.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .nest("/billing", billing_routes())
        .nest("/billing/webhooks", webhook_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::adapters::http::middleware::{auth_middleware, AuthState};
    use crate::adapters::memory::InMemoryUserStore;
    use crate::application::handlers::billing::{
        CreateCheckoutHandler, HandleStripeWebhookHandler, VerifyAppleReceiptHandler,
        VerifyGooglePurchaseHandler,
    };
    use crate::domain::auth::{TokenSigner, TokenVerifier};
    use crate::domain::billing::{
        compute_test_signature, AppleReceiptVerifier, GooglePurchaseVerifier,
    };
    use crate::domain::foundation::UserId;
    use crate::ports::{
        GatewayError, PurchaseGateway, PurchaseRecord, ReceiptGateway, ReceiptVerifyRequest,
        ReceiptVerifyResponse,
    };
    use async_trait::async_trait;

    const WEBHOOK_SECRET: &str = "whsec_route_test";
    const JWT_SECRET: &str = "route-test-signing-secret";

    struct AcceptingReceiptGateway;

    #[async_trait]
    impl ReceiptGateway for AcceptingReceiptGateway {
        async fn verify_receipt(
            &self,
            _endpoint: &str,
            _request: &ReceiptVerifyRequest,
        ) -> Result<ReceiptVerifyResponse, GatewayError> {
            Ok(serde_json::from_value(serde_json::json!({
                "status": 0,
                "receipt": { "in_app": [ { "product_id": "premium_year" } ] }
            }))
            .unwrap())
        }
    }

    struct UnusedPurchaseGateway;

    #[async_trait]
    impl PurchaseGateway for UnusedPurchaseGateway {
        async fn fetch_purchase(
            &self,
            _package_name: &str,
            _product_id: &str,
            _purchase_token: &str,
        ) -> Result<PurchaseRecord, GatewayError> {
            Err(GatewayError::Network("not under test".to_string()))
        }
    }

    fn state(store: Arc<InMemoryUserStore>, webhook_configured: bool) -> BillingAppState {
        let apple_verifier = AppleReceiptVerifier::new(
            Some(SecretString::new("apple-secret".to_string())),
            Arc::new(AcceptingReceiptGateway),
        );
        let google_verifier =
            GooglePurchaseVerifier::new(None, None, Arc::new(UnusedPurchaseGateway));

        BillingAppState {
            webhook: Arc::new(HandleStripeWebhookHandler::new(
                webhook_configured.then(|| SecretString::new(WEBHOOK_SECRET.to_string())),
                store.clone(),
            )),
            apple: Arc::new(VerifyAppleReceiptHandler::new(
                Arc::new(apple_verifier),
                store.clone(),
            )),
            google: Arc::new(VerifyGooglePurchaseHandler::new(
                Arc::new(google_verifier),
                store,
            )),
            checkout: Arc::new(CreateCheckoutHandler::new(None)),
        }
    }

    fn app(store: Arc<InMemoryUserStore>, webhook_configured: bool) -> axum::Router {
        let verifier: AuthState = Arc::new(TokenVerifier::new(
            None,
            SecretString::new(JWT_SECRET.to_string()),
        ));

        Router::new()
            .nest("/api", billing_router())
            .layer(axum::middleware::from_fn_with_state(
                verifier,
                auth_middleware,
            ))
            .with_state(state(store, webhook_configured))
    }

    fn bearer_for(user_id: &str) -> String {
        let signer = TokenSigner::new(SecretString::new(JWT_SECRET.to_string()), 3600);
        let token = signer
            .issue(
                &UserId::new(user_id).unwrap(),
                "test@example.com",
                Utc::now(),
            )
            .unwrap();
        format!("Bearer {}", token)
    }

    fn signed_webhook_request(payload: &str, secret: &str) -> Request<Body> {
        let timestamp = Utc::now().timestamp();
        let signature = compute_test_signature(secret, timestamp, payload);
        Request::builder()
            .method("POST")
            .uri("/api/billing/webhooks/stripe")
            .header("Stripe-Signature", format!("t={},v1={}", timestamp, signature))
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn checkout_payload(user_id: &str) -> String {
        serde_json::json!({
            "id": "evt_route_1",
            "type": "checkout.session.completed",
            "created": Utc::now().timestamp(),
            "data": { "object": { "id": "cs_1", "metadata": { "user_id": user_id } } },
            "livemode": false,
        })
        .to_string()
    }

    #[tokio::test]
    async fn webhook_with_valid_signature_grants_and_acks() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");

        let response = app(store.clone(), true)
            .oneshot(signed_webhook_request(&checkout_payload("u1"), WEBHOOK_SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.get("u1").unwrap().is_premium);
    }

    #[tokio::test]
    async fn webhook_with_bad_signature_is_unauthorized() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");

        let response = app(store.clone(), true)
            .oneshot(signed_webhook_request(&checkout_payload("u1"), "whsec_wrong"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!store.get("u1").unwrap().is_premium);
    }

    #[tokio::test]
    async fn webhook_without_secret_is_service_unavailable() {
        let store = Arc::new(InMemoryUserStore::new());

        let response = app(store, false)
            .oneshot(signed_webhook_request(&checkout_payload("u1"), WEBHOOK_SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn apple_verify_requires_authentication() {
        let store = Arc::new(InMemoryUserStore::new());

        let request = Request::builder()
            .method("POST")
            .uri("/api/billing/apple/verify")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"receipt_data":"blob"}"#))
            .unwrap();

        let response = app(store, true).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn apple_verify_with_valid_token_grants_premium() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");

        let request = Request::builder()
            .method("POST")
            .uri("/api/billing/apple/verify")
            .header("Authorization", bearer_for("u1"))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"receipt_data":"blob"}"#))
            .unwrap();

        let response = app(store.clone(), true).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(store.get("u1").unwrap().is_premium);
    }

    #[tokio::test]
    async fn google_verify_unconfigured_is_service_unavailable() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");

        let request = Request::builder()
            .method("POST")
            .uri("/api/billing/google/verify")
            .header("Authorization", bearer_for("u1"))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"purchase_token":"t","product_id":"p"}"#))
            .unwrap();

        let response = app(store, true).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn checkout_unconfigured_is_service_unavailable() {
        let store = Arc::new(InMemoryUserStore::new());
        store.insert_free_user("u1", "u1@example.com");

        let request = Request::builder()
            .method("POST")
            .uri("/api/billing/checkout")
            .header("Authorization", bearer_for("u1"))
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"success_url":"https://a/s","cancel_url":"https://a/c"}"#,
            ))
            .unwrap();

        let response = app(store, true).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
