//! Task repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, TaskId, UserId};
use crate::domain::tasks::{Task, TaskStatus};

/// Filter for task listings. All criteria are optional and conjunctive.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub project_id: Option<ProjectId>,
    pub status: Option<TaskStatus>,
}

/// Port for persisting tasks.
///
/// Every read and write is scoped by owner: a task id belonging to another
/// user behaves exactly like a missing task.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persists a new task.
    async fn create(&self, task: &Task) -> Result<(), DomainError>;

    /// Finds one of `user_id`'s tasks by id.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Task>, DomainError>;

    /// Lists `user_id`'s tasks matching the filter, newest first.
    async fn list(&self, user_id: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, DomainError>;

    /// Persists changes to an existing task.
    async fn update(&self, task: &Task) -> Result<(), DomainError>;

    /// Deletes one of `user_id`'s tasks. Returns false when nothing matched.
    async fn delete(&self, user_id: &UserId, task_id: &TaskId) -> Result<bool, DomainError>;
}
