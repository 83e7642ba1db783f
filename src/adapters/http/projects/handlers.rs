//! HTTP handlers for project and label endpoints.
//!
//! Projects and labels share the same thin shape (owner + name + color), so
//! both resources live in this module.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::adapters::http::billing::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::foundation::{DomainError, LabelId, ProjectId};
use crate::domain::tasks::{Label, Project};
use crate::ports::{LabelRepository, ProjectRepository};

use super::dto::{CreateNamedRequest, UpdateNamedRequest};

/// Shared state for project and label endpoints.
#[derive(Clone)]
pub struct ProjectsAppState {
    pub projects: Arc<dyn ProjectRepository>,
    pub labels: Arc<dyn LabelRepository>,
}

fn storage_error(err: DomainError) -> Response {
    tracing::error!(error = %err, "project/label storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("STORAGE_ERROR", "storage failure")),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("NOT_FOUND", format!("{} not found", what))),
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

// ════════════════════════════════════════════════════════════════════════════════
// Projects
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /projects` - list the caller's projects.
pub async fn list_projects(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
) -> Response {
    match state.projects.list(&identity.user_id).await {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `POST /projects` - create a project.
pub async fn create_project(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<CreateNamedRequest>,
) -> Response {
    let project = match Project::create(identity.user_id, request.name, request.color, Utc::now())
    {
        Ok(project) => project,
        Err(err) => return validation_error(err),
    };

    match state.projects.create(&project).await {
        Ok(()) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `GET /projects/{id}` - fetch one project.
pub async fn get_project(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(project_id): Path<ProjectId>,
) -> Response {
    match state
        .projects
        .find_by_id(&identity.user_id, &project_id)
        .await
    {
        Ok(Some(project)) => (StatusCode::OK, Json(project)).into_response(),
        Ok(None) => not_found("project"),
        Err(err) => storage_error(err),
    }
}

/// `PATCH /projects/{id}` - update a project.
pub async fn update_project(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(project_id): Path<ProjectId>,
    Json(request): Json<UpdateNamedRequest>,
) -> Response {
    let mut project = match state
        .projects
        .find_by_id(&identity.user_id, &project_id)
        .await
    {
        Ok(Some(project)) => project,
        Ok(None) => return not_found("project"),
        Err(err) => return storage_error(err),
    };

    if let Err(err) = project.update(request.name, request.color, Utc::now()) {
        return validation_error(err);
    }

    match state.projects.update(&project).await {
        Ok(()) => (StatusCode::OK, Json(project)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `DELETE /projects/{id}` - delete a project.
pub async fn delete_project(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(project_id): Path<ProjectId>,
) -> Response {
    match state.projects.delete(&identity.user_id, &project_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("project"),
        Err(err) => storage_error(err),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Labels
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /labels` - list the caller's labels.
pub async fn list_labels(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
) -> Response {
    match state.labels.list(&identity.user_id).await {
        Ok(labels) => (StatusCode::OK, Json(labels)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `POST /labels` - create a label.
pub async fn create_label(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Json(request): Json<CreateNamedRequest>,
) -> Response {
    let label = match Label::create(identity.user_id, request.name, request.color, Utc::now()) {
        Ok(label) => label,
        Err(err) => return validation_error(err),
    };

    match state.labels.create(&label).await {
        Ok(()) => (StatusCode::CREATED, Json(label)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `GET /labels/{id}` - fetch one label.
pub async fn get_label(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(label_id): Path<LabelId>,
) -> Response {
    match state.labels.find_by_id(&identity.user_id, &label_id).await {
        Ok(Some(label)) => (StatusCode::OK, Json(label)).into_response(),
        Ok(None) => not_found("label"),
        Err(err) => storage_error(err),
    }
}

/// `PATCH /labels/{id}` - update a label.
pub async fn update_label(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(label_id): Path<LabelId>,
    Json(request): Json<UpdateNamedRequest>,
) -> Response {
    let mut label = match state.labels.find_by_id(&identity.user_id, &label_id).await {
        Ok(Some(label)) => label,
        Ok(None) => return not_found("label"),
        Err(err) => return storage_error(err),
    };

    if let Err(err) = label.update(request.name, request.color, Utc::now()) {
        return validation_error(err);
    }

    match state.labels.update(&label).await {
        Ok(()) => (StatusCode::OK, Json(label)).into_response(),
        Err(err) => storage_error(err),
    }
}

/// `DELETE /labels/{id}` - delete a label.
pub async fn delete_label(
    State(state): State<ProjectsAppState>,
    RequireAuth(identity): RequireAuth,
    Path(label_id): Path<LabelId>,
) -> Response {
    match state.labels.delete(&identity.user_id, &label_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("label"),
        Err(err) => storage_error(err),
    }
}
