//! HandleStripeWebhookHandler - Command handler for payment-processor webhooks.
//!
//! The webhook is authenticated by signature, not by user bearer token, so
//! this is the one entitlement path that bypasses the token verifier. The
//! payload is never parsed before the signature checks out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::domain::billing::{
    CheckoutSessionObject, PremiumGrant, StripeEventType, StripeWebhookVerifier, WebhookError,
};
use crate::domain::foundation::UserId;
use crate::ports::{GrantOutcome, UserStore};

/// Command to handle one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, exactly as received (signature covers these bytes).
    pub payload: Vec<u8>,
    /// Value of the `Stripe-Signature` header.
    pub signature: String,
}

/// Outcome of webhook processing. Every variant is acknowledged with 200 to
/// the sender; only errors produce non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStripeWebhookResult {
    /// Checkout completed and the premium grant was written.
    Granted { user_id: UserId },
    /// Redelivery of an event that was already applied; no state change.
    AlreadyApplied { user_id: UserId },
    /// Event kind this service does not act on.
    Acknowledged,
}

/// Handler for payment-processor webhook deliveries.
pub struct HandleStripeWebhookHandler {
    /// Present only when the webhook signing secret is configured.
    verifier: Option<StripeWebhookVerifier>,
    users: Arc<dyn UserStore>,
}

impl HandleStripeWebhookHandler {
    /// Creates the handler. A `None` secret disables the endpoint: every
    /// delivery fails fast with [`WebhookError::NotConfigured`] and the
    /// payload is never parsed.
    pub fn new(webhook_secret: Option<SecretString>, users: Arc<dyn UserStore>) -> Self {
        Self {
            verifier: webhook_secret.map(StripeWebhookVerifier::new),
            users,
        }
    }

    /// Processes one webhook delivery.
    pub async fn handle(
        &self,
        cmd: HandleStripeWebhookCommand,
        now: DateTime<Utc>,
    ) -> Result<HandleStripeWebhookResult, WebhookError> {
        let verifier = self.verifier.as_ref().ok_or(WebhookError::NotConfigured)?;

        let event = verifier.verify_and_parse(&cmd.payload, &cmd.signature, now)?;

        match event.parsed_type() {
            StripeEventType::CheckoutSessionCompleted => {
                let session: CheckoutSessionObject = event
                    .deserialize_object()
                    .map_err(|e| WebhookError::ParseError(e.to_string()))?;

                // A session without its user association means checkout
                // creation went wrong; surface it instead of skipping.
                let user_id = session
                    .user_id()
                    .and_then(|id| UserId::new(id).ok())
                    .ok_or(WebhookError::MissingMetadata("user_id"))?;

                // Expiry is anchored to the event's own timestamp so a
                // redelivered event computes the identical grant.
                let anchor = DateTime::from_timestamp(event.created, 0).unwrap_or(now);
                let grant = PremiumGrant::starting_at(anchor);

                match self
                    .users
                    .grant_premium(&user_id, &grant, Some(&event.id))
                    .await?
                {
                    GrantOutcome::Applied => {
                        tracing::info!(%user_id, event_id = %event.id, "premium grant applied");
                        Ok(HandleStripeWebhookResult::Granted { user_id })
                    }
                    GrantOutcome::AlreadyApplied => {
                        tracing::info!(%user_id, event_id = %event.id, "duplicate webhook delivery, no-op");
                        Ok(HandleStripeWebhookResult::AlreadyApplied { user_id })
                    }
                }
            }
            StripeEventType::Unrecognized => {
                tracing::debug!(event_type = %event.event_type, "unhandled webhook event acknowledged");
                Ok(HandleStripeWebhookResult::Acknowledged)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserStore;
    use crate::domain::billing::compute_test_signature;
    use chrono::Duration;

    const SECRET: &str = "whsec_handler_test";

    fn signed_command(payload: &str, secret: &str, at: DateTime<Utc>) -> HandleStripeWebhookCommand {
        let signature = format!(
            "t={},v1={}",
            at.timestamp(),
            compute_test_signature(secret, at.timestamp(), payload)
        );
        HandleStripeWebhookCommand {
            payload: payload.as_bytes().to_vec(),
            signature,
        }
    }

    fn checkout_event(event_id: &str, created: i64, metadata: serde_json::Value) -> String {
        serde_json::json!({
            "id": event_id,
            "type": "checkout.session.completed",
            "created": created,
            "data": { "object": { "id": "cs_1", "metadata": metadata } },
            "livemode": false,
        })
        .to_string()
    }

    fn store_with_user(id: &str) -> Arc<InMemoryUserStore> {
        let store = InMemoryUserStore::new();
        store.insert_free_user(id, &format!("{}@example.com", id));
        Arc::new(store)
    }

    fn handler(store: Arc<InMemoryUserStore>) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(Some(SecretString::new(SECRET.to_string())), store)
    }

    #[tokio::test]
    async fn valid_checkout_event_grants_premium_one_year_from_event_time() {
        let store = store_with_user("u1");
        let now = Utc::now();
        let payload = checkout_event("evt_1", now.timestamp(), serde_json::json!({ "user_id": "u1" }));

        let result = handler(store.clone())
            .handle(signed_command(&payload, SECRET, now), now)
            .await
            .unwrap();

        assert!(matches!(result, HandleStripeWebhookResult::Granted { .. }));
        let record = store.get("u1").unwrap();
        assert!(record.is_premium);
        let expires = record.premium_expires_at.unwrap();
        let expected = now + Duration::days(365);
        assert!((expires - expected).num_seconds().abs() < 5);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected_without_store_update() {
        let store = store_with_user("u1");
        let now = Utc::now();
        let payload = checkout_event("evt_1", now.timestamp(), serde_json::json!({ "user_id": "u1" }));

        let result = handler(store.clone())
            .handle(signed_command(&payload, "whsec_other", now), now)
            .await;

        assert!(matches!(result, Err(WebhookError::InvalidSignature)));
        assert!(!store.get("u1").unwrap().is_premium);
        assert_eq!(store.grant_calls(), 0);
    }

    #[tokio::test]
    async fn redelivered_event_is_a_no_op() {
        let store = store_with_user("u1");
        let now = Utc::now();
        let payload = checkout_event("evt_dup", now.timestamp(), serde_json::json!({ "user_id": "u1" }));

        let first = handler(store.clone())
            .handle(signed_command(&payload, SECRET, now), now)
            .await
            .unwrap();
        let state_after_first = store.get("u1").unwrap();

        // Redelivery minutes later: same event id, same final state.
        let later = now + Duration::seconds(90);
        let second = handler(store.clone())
            .handle(signed_command(&payload, SECRET, later), later)
            .await
            .unwrap();
        let state_after_second = store.get("u1").unwrap();

        assert!(matches!(first, HandleStripeWebhookResult::Granted { .. }));
        assert!(matches!(
            second,
            HandleStripeWebhookResult::AlreadyApplied { .. }
        ));
        assert_eq!(
            state_after_first.premium_expires_at,
            state_after_second.premium_expires_at
        );
    }

    #[tokio::test]
    async fn missing_user_metadata_is_a_hard_error() {
        let store = store_with_user("u1");
        let now = Utc::now();
        let payload = checkout_event("evt_1", now.timestamp(), serde_json::json!({}));

        let result = handler(store.clone())
            .handle(signed_command(&payload, SECRET, now), now)
            .await;

        assert!(matches!(
            result,
            Err(WebhookError::MissingMetadata("user_id"))
        ));
        assert_eq!(store.grant_calls(), 0);
    }

    #[tokio::test]
    async fn unrecognized_event_is_acknowledged_without_state_change() {
        let store = store_with_user("u1");
        let now = Utc::now();
        let payload = serde_json::json!({
            "id": "evt_other",
            "type": "invoice.payment_succeeded",
            "created": now.timestamp(),
            "data": { "object": {} },
            "livemode": false,
        })
        .to_string();

        let result = handler(store.clone())
            .handle(signed_command(&payload, SECRET, now), now)
            .await
            .unwrap();

        assert_eq!(result, HandleStripeWebhookResult::Acknowledged);
        assert!(!store.get("u1").unwrap().is_premium);
        assert_eq!(store.grant_calls(), 0);
    }

    #[tokio::test]
    async fn unconfigured_secret_fails_fast() {
        let store = store_with_user("u1");
        let handler = HandleStripeWebhookHandler::new(None, store.clone());
        let now = Utc::now();

        let result = handler
            .handle(
                HandleStripeWebhookCommand {
                    payload: b"{}".to_vec(),
                    signature: "t=1,v1=00".to_string(),
                },
                now,
            )
            .await;

        assert!(matches!(result, Err(WebhookError::NotConfigured)));
    }

    #[tokio::test]
    async fn unknown_user_surfaces_store_error() {
        let store = Arc::new(InMemoryUserStore::new());
        let now = Utc::now();
        let payload = checkout_event("evt_1", now.timestamp(), serde_json::json!({ "user_id": "ghost" }));

        let result = handler(store)
            .handle(signed_command(&payload, SECRET, now), now)
            .await;

        assert!(matches!(result, Err(WebhookError::Store(_))));
    }
}
