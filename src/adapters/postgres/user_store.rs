//! PostgreSQL implementation of the user store.
//!
//! `grant_premium` is one conditional UPDATE, never a read-then-write pair:
//! concurrent reconcilers for the same user (a webhook redelivery racing a
//! receipt verification) cannot lose updates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::PremiumGrant;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{GrantOutcome, UserRecord, UserStore};

/// PostgreSQL implementation of the `UserStore` port.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    is_premium: bool,
    premium_expires_at: Option<DateTime<Utc>>,
    last_billing_event_id: Option<String>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id.to_string()).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?;

        Ok(UserRecord {
            id,
            email: row.email,
            is_premium: row.is_premium,
            premium_expires_at: row.premium_expires_at,
            last_billing_event_id: row.last_billing_event_id,
        })
    }
}

/// User ids are opaque strings at the domain level but UUID columns in
/// storage; a non-UUID id cannot name a stored user.
fn parse_user_uuid(user_id: &UserId) -> Option<Uuid> {
    user_id.as_str().parse().ok()
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let Some(uuid) = parse_user_uuid(user_id) else {
            return Ok(None);
        };

        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, email, is_premium, premium_expires_at, last_billing_event_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load user: {}", e)))?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn grant_premium(
        &self,
        user_id: &UserId,
        grant: &PremiumGrant,
        source_event_id: Option<&str>,
    ) -> Result<GrantOutcome, DomainError> {
        let Some(uuid) = parse_user_uuid(user_id) else {
            return Err(DomainError::user_not_found(user_id));
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_premium = TRUE,
                premium_expires_at = $2,
                last_billing_event_id = COALESCE($3::text, last_billing_event_id),
                updated_at = NOW()
            WHERE id = $1
              AND ($3::text IS NULL OR last_billing_event_id IS DISTINCT FROM $3::text)
            "#,
        )
        .bind(uuid)
        .bind(grant.expires_at())
        .bind(source_event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to apply grant: {}", e)))?;

        if result.rows_affected() == 1 {
            return Ok(GrantOutcome::Applied);
        }

        // Zero rows: either the same event was already applied, or the user
        // does not exist. Disambiguate so redelivery stays a clean no-op.
        let exists: Option<bool> = sqlx::query_scalar("SELECT TRUE FROM users WHERE id = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to load user: {}", e)))?;

        if exists.is_some() {
            Ok(GrantOutcome::AlreadyApplied)
        } else {
            Err(DomainError::user_not_found(user_id))
        }
    }
}
