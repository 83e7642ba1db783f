//! Stripe webhook event types.
//!
//! Only the fields this service consumes are captured; everything else in
//! Stripe's event schema is ignored so new processor event kinds stay
//! forward-compatible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp). Used as the
    /// anchor for the entitlement grant so redelivery is deterministic.
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (shape depends on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::parse(&self.event_type)
    }

    /// Attempts to deserialize the data object as the specified type.
    pub fn deserialize_object<T: serde::de::DeserializeOwned>(
        &self,
    ) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Event types this service recognizes.
///
/// Exactly one kind is meaningful (checkout completion, the one-time premium
/// purchase); everything else is acknowledged without a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripeEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,
    /// Any event kind this service does not act on.
    Unrecognized,
}

impl StripeEventType {
    /// Parse event type from its wire string.
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            _ => Self::Unrecognized,
        }
    }
}

/// The checkout session object carried by `checkout.session.completed`.
///
/// `metadata.user_id` is attached at session-creation time and is the only
/// link between the processor's event and our user record.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionObject {
    /// Session identifier (cs_xxx format).
    #[serde(default)]
    pub id: String,

    /// Metadata attached when the session was created.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSessionObject {
    /// The user id attached at session-creation time, if present and
    /// non-empty.
    pub fn user_id(&self) -> Option<&str> {
        self.metadata
            .get("user_id")
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}
