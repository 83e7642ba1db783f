//! PostgreSQL implementation of the project repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, UserId};
use crate::domain::tasks::Project;
use crate::ports::ProjectRepository;

use super::owner_uuid;

/// PostgreSQL implementation of the `ProjectRepository` port.
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a project.
#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = DomainError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id.to_string()).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?;

        Ok(Project {
            id: ProjectId::from_uuid(row.id),
            user_id,
            name: row.name,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, user_id, name, color, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(owner_uuid(&project.user_id)?)
        .bind(&project.name)
        .bind(&project.color)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create project: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        let row: Option<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, color, created_at, updated_at
            FROM projects
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(owner_uuid(user_id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load project: {}", e)))?;

        row.map(Project::try_from).transpose()
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let rows: Vec<ProjectRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, color, created_at, updated_at
            FROM projects
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(owner_uuid(user_id)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list projects: {}", e)))?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $3, color = $4, updated_at = $5
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(owner_uuid(&project.user_id)?)
        .bind(&project.name)
        .bind(&project.color)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update project: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                "Project not found",
            ));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, project_id: &ProjectId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(project_id.as_uuid())
            .bind(owner_uuid(user_id)?)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete project: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
