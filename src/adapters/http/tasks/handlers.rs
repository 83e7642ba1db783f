//! HTTP handlers for task endpoints.
//!
//! Every operation takes the authenticated user from `RequireAuth` and
//! filters by owner; another user's task id behaves like a missing task.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::adapters::http::billing::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::foundation::{DomainError, TaskId};
use crate::domain::tasks::{NewTask, Task, TaskUpdate};
use crate::ports::{TaskFilter, TaskRepository};

use super::dto::{AddSubtaskRequest, CreateTaskRequest, ListTasksParams, UpdateTaskRequest};

/// Shared state for task endpoints.
#[derive(Clone)]
pub struct TasksAppState {
    pub tasks: Arc<dyn TaskRepository>,
}

fn storage_error(err: DomainError) -> Response {
    tracing::error!(error = %err, "task storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("STORAGE_ERROR", "storage failure")),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", "task not found")),
    )
        .into_response()
}

fn validation_error(err: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("VALIDATION_FAILED", err.to_string())),
    )
        .into_response()
}

/// `GET /tasks` - list the caller's tasks.
pub async fn list_tasks(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Query(params): Query<ListTasksParams>,
) -> Response {
    let filter = TaskFilter {
        project_id: params.project_id,
        status: params.status,
    };

    match state.tasks.list(&identity.user_id, &filter).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `POST /tasks` - create a task.
pub async fn create_task(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<CreateTaskRequest>,
) -> Response {
    let new = NewTask {
        title: request.title,
        description: request.description,
        project_id: request.project_id,
        priority: request.priority,
        due_date: request.due_date,
        reminder_at: request.reminder_at,
        label_ids: request.label_ids,
    };

    let task = match Task::create(identity.user_id, new, Utc::now()) {
        Ok(task) => task,
        Err(err) => return validation_error(err),
    };

    match state.tasks.create(&task).await {
        Ok(()) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `GET /tasks/{id}` - fetch one task.
pub async fn get_task(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Path(task_id): Path<TaskId>,
) -> Response {
    match state.tasks.find_by_id(&identity.user_id, &task_id).await {
        Ok(Some(task)) => (StatusCode::OK, Json(task)).into_response(),
        Ok(None) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// `PATCH /tasks/{id}` - partially update a task.
pub async fn update_task(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Path(task_id): Path<TaskId>,
    Json(request): Json<UpdateTaskRequest>,
) -> Response {
    let mut task = match state.tasks.find_by_id(&identity.user_id, &task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => return not_found(),
        Err(err) => return storage_error(err),
    };

    let update = TaskUpdate {
        title: request.title,
        description: request.description,
        project_id: request.project_id,
        priority: request.priority,
        status: request.status,
        due_date: request.due_date,
        reminder_at: request.reminder_at,
        progress: request.progress,
        label_ids: request.label_ids,
    };

    if let Err(err) = task.apply(update, Utc::now()) {
        return validation_error(err);
    }

    match state.tasks.update(&task).await {
        Ok(()) => (StatusCode::OK, Json(task)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `DELETE /tasks/{id}` - delete a task.
pub async fn delete_task(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Path(task_id): Path<TaskId>,
) -> Response {
    match state.tasks.delete(&identity.user_id, &task_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(err) => storage_error(err),
    }
}

/// `POST /tasks/{id}/subtasks` - add a subtask.
pub async fn add_subtask(
    State(state): State<TasksAppState>,
    RequireAuth(identity): RequireAuth,
    Path(task_id): Path<TaskId>,
    Json(request): Json<AddSubtaskRequest>,
) -> Response {
    let mut task = match state.tasks.find_by_id(&identity.user_id, &task_id).await {
        Ok(Some(task)) => task,
        Ok(None) => return not_found(),
        Err(err) => return storage_error(err),
    };

    if let Err(err) = task.add_subtask(request.title) {
        return validation_error(err);
    }
    task.updated_at = Utc::now();

    match state.tasks.update(&task).await {
        Ok(()) => (StatusCode::CREATED, Json(task)).into_response(),
        Err(err) => storage_error(err),
    }
}
