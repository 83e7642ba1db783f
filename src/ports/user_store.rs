//! User record store port.
//!
//! The entitlement reconciler's only window into persistence: lookup by id
//! and one atomic "apply premium grant" update, scoped to a single user. No
//! bulk mutation exists on this port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::billing::{EntitlementState, PremiumGrant};
use crate::domain::foundation::{DomainError, UserId};

/// A stored user record, reduced to the fields the reconciler reads.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub is_premium: bool,
    pub premium_expires_at: Option<DateTime<Utc>>,
    /// Identifier of the last billing event applied to this user, for
    /// webhook redelivery no-ops.
    pub last_billing_event_id: Option<String>,
}

impl UserRecord {
    /// The user's entitlement state as a domain value.
    pub fn entitlement(&self) -> EntitlementState {
        EntitlementState::from_record(self.is_premium, self.premium_expires_at)
    }
}

/// Outcome of applying a premium grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The grant was written.
    Applied,
    /// The same source event was already applied; nothing changed.
    AlreadyApplied,
}

/// Port for reading and updating user records.
///
/// # Contract
///
/// `grant_premium` must be a single atomic conditional write keyed by user
/// id, never a read-then-write pair visible to concurrent reconcilers: a
/// processor redelivering a webhook concurrently with a receipt-verify call
/// for the same user must not lose an update.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError>;

    /// Applies a premium grant to one user.
    ///
    /// When `source_event_id` is given and equals the user's last applied
    /// billing event, the write is skipped and `AlreadyApplied` is returned.
    /// Returns `DomainError` with `ErrorCode::UserNotFound` when no such
    /// user exists.
    async fn grant_premium(
        &self,
        user_id: &UserId,
        grant: &PremiumGrant,
        source_event_id: Option<&str>,
    ) -> Result<GrantOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn user_record_exposes_entitlement_state() {
        let expires = Utc::now() + Duration::days(10);
        let record = UserRecord {
            id: UserId::new("u1").unwrap(),
            email: "u1@example.com".to_string(),
            is_premium: true,
            premium_expires_at: Some(expires),
            last_billing_event_id: None,
        };

        assert_eq!(
            record.entitlement(),
            EntitlementState::Premium { expires_at: expires }
        );
    }

    #[test]
    fn free_record_has_free_entitlement() {
        let record = UserRecord {
            id: UserId::new("u1").unwrap(),
            email: "u1@example.com".to_string(),
            is_premium: false,
            premium_expires_at: None,
            last_billing_event_id: None,
        };

        assert_eq!(record.entitlement(), EntitlementState::Free);
    }
}
