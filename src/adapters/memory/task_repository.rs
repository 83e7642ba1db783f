//! In-memory implementation of the task repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TaskId, UserId};
use crate::domain::tasks::Task;
use crate::ports::{TaskFilter, TaskRepository};

/// In-memory task repository for tests and local development.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Mutex<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> Result<(), DomainError> {
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        task_id: &TaskId,
    ) -> Result<Option<Task>, DomainError> {
        Ok(self
            .tasks
            .lock()
            .unwrap()
            .get(task_id)
            .filter(|t| &t.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.lock().unwrap();
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| &t.user_id == user_id)
            .filter(|t| {
                filter
                    .project_id
                    .map_or(true, |p| t.project_id == Some(p))
            })
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn update(&self, task: &Task) -> Result<(), DomainError> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get_mut(&task.id) {
            Some(existing) if existing.user_id == task.user_id => {
                *existing = task.clone();
                Ok(())
            }
            _ => Err(DomainError::new(
                crate::domain::foundation::ErrorCode::TaskNotFound,
                "Task not found",
            )),
        }
    }

    async fn delete(&self, user_id: &UserId, task_id: &TaskId) -> Result<bool, DomainError> {
        let mut tasks = self.tasks.lock().unwrap();
        let owned = tasks
            .get(task_id)
            .map_or(false, |t| &t.user_id == user_id);
        if owned {
            tasks.remove(task_id);
        }
        Ok(owned)
    }
}
