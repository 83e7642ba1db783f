//! HTTP DTOs for user endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ports::UserRecord;

/// View of the authenticated user's profile.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    /// Effective premium status at response time.
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_expires_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    /// Builds the view, evaluating entitlement at `now`.
    pub fn from_record(record: UserRecord, now: DateTime<Utc>) -> Self {
        let is_premium = record.entitlement().is_premium_at(now);
        Self {
            id: record.id.to_string(),
            email: record.email,
            is_premium,
            premium_expires_at: record.premium_expires_at,
        }
    }
}
