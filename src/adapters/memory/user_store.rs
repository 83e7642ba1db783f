//! In-memory implementation of the user store.
//!
//! Used by tests as a spy double and by local development without a
//! database. The premium-grant write happens under one lock, mirroring the
//! atomic conditional update the Postgres adapter performs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::billing::PremiumGrant;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{GrantOutcome, UserRecord, UserStore};

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, UserRecord>>,
    grant_calls: AtomicU32,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a non-premium user.
    pub fn insert_free_user(&self, id: &str, email: &str) {
        let record = UserRecord {
            id: UserId::new(id).expect("non-empty id"),
            email: email.to_string(),
            is_premium: false,
            premium_expires_at: None,
            last_billing_event_id: None,
        };
        self.users.lock().unwrap().insert(id.to_string(), record);
    }

    /// Snapshot of a user record, if present.
    pub fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.lock().unwrap().get(id).cloned()
    }

    /// Number of `grant_premium` invocations that reached this store.
    pub fn grant_calls(&self) -> u32 {
        self.grant_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.users.lock().unwrap().get(user_id.as_str()).cloned())
    }

    async fn grant_premium(
        &self,
        user_id: &UserId,
        grant: &PremiumGrant,
        source_event_id: Option<&str>,
    ) -> Result<GrantOutcome, DomainError> {
        self.grant_calls.fetch_add(1, Ordering::SeqCst);

        let mut users = self.users.lock().unwrap();
        let record = users
            .get_mut(user_id.as_str())
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        if let Some(event_id) = source_event_id {
            if record.last_billing_event_id.as_deref() == Some(event_id) {
                return Ok(GrantOutcome::AlreadyApplied);
            }
            record.last_billing_event_id = Some(event_id.to_string());
        }

        record.is_premium = true;
        record.premium_expires_at = Some(grant.expires_at());
        Ok(GrantOutcome::Applied)
    }
}
