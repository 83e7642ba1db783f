//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` - validates the Authorization header and injects the
//!   verified identity into request extensions
//! - `RequireAuth` - extractor for handlers that require authentication
//!
//! The middleware wraps the domain [`TokenVerifier`]; the response body for
//! a rejected credential is deliberately generic (no issuer, no reason).

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::domain::auth::TokenVerifier;
use crate::domain::foundation::{AuthError, VerifiedIdentity};

/// Auth middleware state - the shared token verifier.
pub type AuthState = Arc<TokenVerifier>;

/// Authentication middleware.
///
/// 1. Reads the `Authorization` header
/// 2. Verifies it with the [`TokenVerifier`] against the current clock
/// 3. On success, injects [`VerifiedIdentity`] into request extensions
/// 4. On missing header, continues unauthenticated (RequireAuth rejects
///    later where authentication is mandatory)
/// 5. On a malformed or invalid credential, returns 401
pub async fn auth_middleware(
    State(verifier): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    match credential {
        Some(credential) => match verifier.verify(&credential, Utc::now()) {
            Ok(identity) => {
                request.extensions_mut().insert(identity);
                next.run(request).await
            }
            Err(err) => {
                // Same body for malformed and invalid: callers learn nothing
                // about which issuer or check rejected them.
                let message = match err {
                    AuthError::MalformedCredential => "Invalid authorization format",
                    AuthError::InvalidCredential => "Invalid token",
                };
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": message,
                        "code": "AUTH_ERROR"
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires authentication.
///
/// Returns 401 when the auth middleware did not inject a verified identity.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub VerifiedIdentity);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<VerifiedIdentity>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No verified identity was attached to the request.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": message,
                "code": "UNAUTHENTICATED"
            })),
        )
            .into_response()
    }
}
