//! Foundation types shared across the domain.
//!
//! Identifier value objects, error types, and the verified-identity types
//! produced by credential verification.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, TokenIssuer, VerifiedIdentity};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{LabelId, ProjectId, SubtaskId, TaskId, UserId};
