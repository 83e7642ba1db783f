//! Project repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId, UserId};
use crate::domain::tasks::Project;

/// Port for persisting projects, scoped by owner.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persists a new project.
    async fn create(&self, project: &Project) -> Result<(), DomainError>;

    /// Finds one of `user_id`'s projects by id.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Project>, DomainError>;

    /// Lists all of `user_id`'s projects.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError>;

    /// Persists changes to an existing project.
    async fn update(&self, project: &Project) -> Result<(), DomainError>;

    /// Deletes one of `user_id`'s projects. Returns false when nothing
    /// matched.
    async fn delete(&self, user_id: &UserId, project_id: &ProjectId) -> Result<bool, DomainError>;
}
