//! PostgreSQL implementation of the task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, LabelId, ProjectId, TaskId, UserId,
};
use crate::domain::tasks::{Subtask, Task, TaskStatus};
use crate::ports::{TaskFilter, TaskRepository};

use super::owner_uuid;

/// PostgreSQL implementation of the `TaskRepository` port.
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a task.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    user_id: Uuid,
    project_id: Option<Uuid>,
    title: String,
    description: String,
    priority: i16,
    status: String,
    due_date: Option<DateTime<Utc>>,
    reminder_at: Option<DateTime<Utc>>,
    progress: i16,
    label_ids: Vec<Uuid>,
    subtasks: Json<Vec<Subtask>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id.to_string()).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?;
        let status = TaskStatus::parse(&row.status).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
        })?;

        Ok(Task {
            id: TaskId::from_uuid(row.id),
            user_id,
            project_id: row.project_id.map(ProjectId::from_uuid),
            title: row.title,
            description: row.description,
            priority: row.priority,
            status,
            due_date: row.due_date,
            reminder_at: row.reminder_at,
            progress: row.progress,
            label_ids: row.label_ids.into_iter().map(LabelId::from_uuid).collect(),
            subtasks: row.subtasks.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, project_id, title, description, priority, status,
           due_date, reminder_at, progress, label_ids, subtasks,
           created_at, updated_at
    FROM tasks
"#;

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> Result<(), DomainError> {
        let user_uuid = owner_uuid(&task.user_id)?;

        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, user_id, project_id, title, description, priority, status,
                due_date, reminder_at, progress, label_ids, subtasks,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(user_uuid)
        .bind(task.project_id.map(|p| *p.as_uuid()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.reminder_at)
        .bind(task.progress)
        .bind(task.label_ids.iter().map(|l| *l.as_uuid()).collect::<Vec<_>>())
        .bind(Json(&task.subtasks))
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create task: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Task>, DomainError> {
        let user_uuid = owner_uuid(user_id)?;

        let row: Option<TaskRow> =
            sqlx::query_as(&format!("{} WHERE id = $1 AND user_id = $2", SELECT_COLUMNS))
                .bind(task_id.as_uuid())
                .bind(user_uuid)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to load task: {}", e)))?;

        row.map(Task::try_from).transpose()
    }

    async fn list(&self, user_id: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, DomainError> {
        let user_uuid = owner_uuid(user_id)?;

        let rows: Vec<TaskRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR project_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#,
            SELECT_COLUMNS
        ))
        .bind(user_uuid)
        .bind(filter.project_id.map(|p| *p.as_uuid()))
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list tasks: {}", e)))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let user_uuid = owner_uuid(&task.user_id)?;

        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET project_id = $3, title = $4, description = $5, priority = $6,
                status = $7, due_date = $8, reminder_at = $9, progress = $10,
                label_ids = $11, subtasks = $12, updated_at = $13
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task.id.as_uuid())
        .bind(user_uuid)
        .bind(task.project_id.map(|p| *p.as_uuid()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.status.as_str())
        .bind(task.due_date)
        .bind(task.reminder_at)
        .bind(task.progress)
        .bind(task.label_ids.iter().map(|l| *l.as_uuid()).collect::<Vec<_>>())
        .bind(Json(&task.subtasks))
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update task: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::TaskNotFound, "Task not found"));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId, task_id: &TaskId) -> Result<bool, DomainError> {
        let user_uuid = owner_uuid(user_id)?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id.as_uuid())
            .bind(user_uuid)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete task: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
