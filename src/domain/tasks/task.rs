//! Task entity and related value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LabelId, ProjectId, SubtaskId, TaskId, UserId, ValidationError};

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// A sub-item under a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    /// Creates a new incomplete subtask.
    pub fn new(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("subtask.title"));
        }
        Ok(Self {
            id: SubtaskId::new(),
            title,
            completed: false,
        })
    }
}

/// A todo task, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub project_id: Option<ProjectId>,
    pub title: String,
    pub description: String,
    /// 0 = none, 1..=4 map to P4..P1.
    pub priority: i16,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    /// Completion percentage, 0..=100.
    pub progress: i16,
    pub label_ids: Vec<LabelId>,
    pub subtasks: Vec<Subtask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project_id: Option<ProjectId>,
    pub priority: i16,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder_at: Option<DateTime<Utc>>,
    pub label_ids: Vec<LabelId>,
}

/// Partial update for a task; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
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

impl Task {
    /// Creates a new task for `user_id`, validating field constraints.
    pub fn create(user_id: UserId, new: NewTask, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        validate_title(&new.title)?;
        validate_priority(new.priority)?;

        Ok(Self {
            id: TaskId::new(),
            user_id,
            project_id: new.project_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: TaskStatus::Pending,
            due_date: new.due_date,
            reminder_at: new.reminder_at,
            progress: 0,
            label_ids: new.label_ids,
            subtasks: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update, validating changed fields.
    pub fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if let Some(title) = update.title {
            validate_title(&title)?;
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(project_id) = update.project_id {
            self.project_id = Some(project_id);
        }
        if let Some(priority) = update.priority {
            validate_priority(priority)?;
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(reminder_at) = update.reminder_at {
            self.reminder_at = Some(reminder_at);
        }
        if let Some(progress) = update.progress {
            validate_progress(progress)?;
            self.progress = progress;
        }
        if let Some(label_ids) = update.label_ids {
            self.label_ids = label_ids;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Adds a subtask.
    pub fn add_subtask(&mut self, title: impl Into<String>) -> Result<&Subtask, ValidationError> {
        let subtask = Subtask::new(title)?;
        self.subtasks.push(subtask);
        Ok(self.subtasks.last().expect("just pushed"))
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(())
}

fn validate_priority(priority: i16) -> Result<(), ValidationError> {
    if !(0..=4).contains(&priority) {
        return Err(ValidationError::out_of_range("priority", 0, 4, priority.into()));
    }
    Ok(())
}

fn validate_progress(progress: i16) -> Result<(), ValidationError> {
    if !(0..=100).contains(&progress) {
        return Err(ValidationError::out_of_range(
            "progress",
            0,
            100,
            progress.into(),
        ));
    }
    Ok(())
}
