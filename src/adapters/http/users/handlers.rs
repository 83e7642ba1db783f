//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use crate::adapters::http::billing::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::ports::UserStore;

use super::dto::UserResponse;

/// Shared state for user endpoints.
#[derive(Clone)]
pub struct UsersAppState {
    pub users: Arc<dyn UserStore>,
}

/// `GET /me` - the authenticated user's profile.
pub async fn get_me(
    State(state): State<UsersAppState>,
    RequireAuth(identity): RequireAuth,
) -> Response {
    match state.users.find_by_id(&identity.user_id).await {
        Ok(Some(record)) => {
            (StatusCode::OK, Json(UserResponse::from_record(record, Utc::now()))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("NOT_FOUND", "user not found")),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "user lookup failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("STORAGE_ERROR", "storage failure")),
            )
                .into_response()
        }
    }
}
