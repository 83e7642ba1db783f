//! Axum router configuration for user endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_me, UsersAppState};

/// User routes (require authentication).
///
/// - `GET /me` - The authenticated user's profile
pub fn users_router() -> Router<UsersAppState> {
    Router::new().route("/me", get(get_me))
}
