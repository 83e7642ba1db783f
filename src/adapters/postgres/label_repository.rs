//! PostgreSQL implementation of the label repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, LabelId, UserId};
use crate::domain::tasks::Label;
use crate::ports::LabelRepository;

use super::owner_uuid;

/// PostgreSQL implementation of the `LabelRepository` port.
pub struct PostgresLabelRepository {
    pool: PgPool,
}

impl PostgresLabelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a label.
#[derive(Debug, sqlx::FromRow)]
struct LabelRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LabelRow> for Label {
    type Error = DomainError;

    fn try_from(row: LabelRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id.to_string()).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?;

        Ok(Label {
            id: LabelId::from_uuid(row.id),
            user_id,
            name: row.name,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl LabelRepository for PostgresLabelRepository {
    async fn create(&self, label: &Label) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO labels (id, user_id, name, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(label.id.as_uuid())
        .bind(owner_uuid(&label.user_id)?)
        .bind(&label.name)
        .bind(&label.color)
        .bind(label.created_at)
        .bind(label.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create label: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        label_id: &LabelId,
    ) -> Result<Option<Label>, DomainError> {
        let row: Option<LabelRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, color, created_at, updated_at
            FROM labels
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(label_id.as_uuid())
        .bind(owner_uuid(user_id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load label: {}", e)))?;

        row.map(Label::try_from).transpose()
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Label>, DomainError> {
        let rows: Vec<LabelRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, color, created_at, updated_at
            FROM labels
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_uuid(user_id)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list labels: {}", e)))?;

        rows.into_iter().map(Label::try_from).collect()
    }

    async fn update(&self, label: &Label) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE labels
            SET name = $3, color = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(label.id.as_uuid())
        .bind(owner_uuid(&label.user_id)?)
        .bind(&label.name)
        .bind(&label.color)
        .bind(label.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update label: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::LabelNotFound, "Label not found"));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, label_id: &LabelId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM labels WHERE id = $1 AND user_id = $2")
            .bind(label_id.as_uuid())
            .bind(owner_uuid(user_id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete label: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
