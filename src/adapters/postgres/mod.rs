//! PostgreSQL adapters.
//!
//! sqlx-backed implementations of the persistence ports. Schema lives in
//! `migrations/`.

mod label_repository;
mod project_repository;
mod task_repository;
mod user_store;

pub use label_repository::PostgresLabelRepository;
pub use project_repository::PostgresProjectRepository;
pub use task_repository::PostgresTaskRepository;
pub use user_store::PostgresUserStore;

use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Maps a domain user id onto its UUID storage representation.
pub(crate) fn owner_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    user_id.as_str().parse().map_err(|_| {
        DomainError::new(
            ErrorCode::ValidationFailed,
            format!("User id '{}' is not a UUID", user_id),
        )
    })
}
