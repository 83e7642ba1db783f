//! Axum router configuration for project and label endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_label, create_project, delete_label, delete_project, get_label, get_project,
    list_labels, list_projects, update_label, update_project, ProjectsAppState,
};

/// Project routes (all require authentication).
pub fn projects_router() -> Router<ProjectsAppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).patch(update_project).delete(delete_project),
        )
}

/// Label routes (all require authentication).
pub fn labels_router() -> Router<ProjectsAppState> {
    Router::new()
        .route("/", get(list_labels).post(create_label))
        .route(
            "/:id",
            get(get_label).patch(update_label).delete(delete_label),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use crate::adapters::http::middleware::{auth_middleware, AuthState};
    use crate::adapters::memory::{InMemoryLabelRepository, InMemoryProjectRepository};
    use crate::domain::auth::{TokenSigner, TokenVerifier};
    use crate::domain::foundation::UserId;
    use crate::ports::ProjectRepository;

    const JWT_SECRET: &str = "projects-route-secret";

    fn app(projects: Arc<InMemoryProjectRepository>) -> axum::Router {
        let verifier: AuthState = Arc::new(TokenVerifier::new(
            None,
            SecretString::new(JWT_SECRET.to_string()),
        ));
        let state = ProjectsAppState {
            projects,
            labels: Arc::new(InMemoryLabelRepository::new()),
        };

        Router::new()
            .nest("/api/projects", projects_router())
            .nest("/api/labels", labels_router())
            .layer(axum::middleware::from_fn_with_state(
                verifier,
                auth_middleware,
            ))
            .with_state(state)
    }

    fn bearer_for(user_id: &str) -> String {
        let signer = TokenSigner::new(SecretString::new(JWT_SECRET.to_string()), 3600);
        let token = signer
            .issue(&UserId::new(user_id).unwrap(), "p@example.com", Utc::now())
            .unwrap();
        format!("Bearer {}", token)
    }

    #[tokio::test]
    async fn create_project_persists_for_owner() {
        let projects = Arc::new(InMemoryProjectRepository::new());

        let request = Request::builder()
            .method("POST")
            .uri("/api/projects/")
            .header("Authorization", bearer_for("u1"))
            .header("content-type", "application/json")
            .body(Body::from(r##"{"name":"Work","color":"#336699"}"##))
            .unwrap();
        let response = app(projects.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let listed = projects.list(&UserId::new("u1").unwrap()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Work");
    }

    #[tokio::test]
    async fn label_routes_require_authentication() {
        let projects = Arc::new(InMemoryProjectRepository::new());

        let request = Request::builder()
            .uri("/api/labels/")
            .body(Body::empty())
            .unwrap();
        let response = app(projects).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
