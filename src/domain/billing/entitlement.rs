//! Entitlement state machine.
//!
//! The only transition is `grant`: `Free -> Premium(expires_at)` or
//! `Premium -> Premium(new expires_at)`. Nothing in this core ever moves a
//! user back to `Free`; expiry-based downgrade is a read-time concern.

use chrono::{DateTime, Duration, Utc};

/// Fixed entitlement duration for the one-time-payment model.
pub const PREMIUM_GRANT_DAYS: i64 = 365;

/// A premium grant anchored to a point in time.
///
/// The expiry is computed from the anchor, not from processing time, so a
/// grant derived from a webhook event timestamp is deterministic under
/// redelivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumGrant {
    expires_at: DateTime<Utc>,
}

impl PremiumGrant {
    /// Creates the fixed-duration grant starting at `anchor`.
    pub fn starting_at(anchor: DateTime<Utc>) -> Self {
        Self {
            expires_at: anchor + Duration::days(PREMIUM_GRANT_DAYS),
        }
    }

    /// When the granted entitlement expires.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// A user's entitlement state.
///
/// `Premium` always carries an expiry: `is_premium == true` without an
/// expiry is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntitlementState {
    #[default]
    Free,
    Premium { expires_at: DateTime<Utc> },
}

impl EntitlementState {
    /// Reconstructs the state from the flat user-record columns.
    ///
    /// A record claiming premium without an expiry violates the write
    /// invariant and is normalized to `Free` rather than trusted.
    pub fn from_record(is_premium: bool, premium_expires_at: Option<DateTime<Utc>>) -> Self {
        match (is_premium, premium_expires_at) {
            (true, Some(expires_at)) => EntitlementState::Premium { expires_at },
            _ => EntitlementState::Free,
        }
    }

    /// Applies a grant. Always lands on `Premium`; a grant to an
    /// already-premium user replaces the expiry with the grant's fixed
    /// window rather than extending it.
    pub fn grant(self, grant: PremiumGrant) -> Self {
        EntitlementState::Premium {
            expires_at: grant.expires_at(),
        }
    }

    /// Whether the entitlement is active at `now`.
    pub fn is_premium_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            EntitlementState::Free => false,
            EntitlementState::Premium { expires_at } => *expires_at > now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_moves_free_to_premium() {
        let now = Utc::now();
        let state = EntitlementState::Free.grant(PremiumGrant::starting_at(now));

        assert_eq!(
            state,
            EntitlementState::Premium {
                expires_at: now + Duration::days(365)
            }
        );
        assert!(state.is_premium_at(now));
    }

    #[test]
    fn grant_expiry_is_in_the_future_relative_to_anchor() {
        let anchor = Utc::now();
        let grant = PremiumGrant::starting_at(anchor);
        assert!(grant.expires_at() > anchor);
    }

    #[test]
    fn regrant_replaces_expiry_instead_of_extending() {
        let first_anchor = Utc::now();
        let state = EntitlementState::Free.grant(PremiumGrant::starting_at(first_anchor));

        // A redelivered grant with the same anchor recomputes the same
        // window; duration never accumulates.
        let regranted = state.grant(PremiumGrant::starting_at(first_anchor));
        assert_eq!(state, regranted);
    }

    #[test]
    fn premium_lapses_after_expiry() {
        let anchor = Utc::now();
        let state = EntitlementState::Free.grant(PremiumGrant::starting_at(anchor));

        let after_expiry = anchor + Duration::days(366);
        assert!(!state.is_premium_at(after_expiry));
    }

    #[test]
    fn from_record_normalizes_premium_without_expiry_to_free() {
        let state = EntitlementState::from_record(true, None);
        assert_eq!(state, EntitlementState::Free);
    }

    #[test]
    fn from_record_round_trips_premium() {
        let expires = Utc::now() + Duration::days(30);
        let state = EntitlementState::from_record(true, Some(expires));
        assert_eq!(state, EntitlementState::Premium { expires_at: expires });
    }

    #[test]
    fn free_is_never_premium() {
        assert!(!EntitlementState::Free.is_premium_at(Utc::now()));
    }
}
