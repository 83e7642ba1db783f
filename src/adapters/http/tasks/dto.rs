//! HTTP DTOs for task endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::foundation::{LabelId, ProjectId};
use crate::domain::tasks::TaskStatus;

/// Request to create a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub priority: i16,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub label_ids: Vec<LabelId>,
}

/// Partial update for a task; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<ProjectId>,
    pub priority: Option<i16>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    pub progress: Option<i16>,
    pub label_ids: Option<Vec<LabelId>>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksParams {
    pub project_id: Option<ProjectId>,
    pub status: Option<TaskStatus>,
}

/// Request to add a subtask.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSubtaskRequest {
    pub title: String,
}
