//! Label repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LabelId, UserId};
use crate::domain::tasks::Label;

/// Port for persisting labels, scoped by owner.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    /// Persists a new label.
    async fn create(&self, label: &Label) -> Result<(), DomainError>;

    /// Finds one of `user_id`'s labels by id.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        label_id: &LabelId,
    ) -> Result<Option<Label>, DomainError>;

    /// Lists all of `user_id`'s labels.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Label>, DomainError>;

    /// Persists changes to an existing label.
    async fn update(&self, label: &Label) -> Result<(), DomainError>;

    /// Deletes one of `user_id`'s labels. Returns false when nothing matched.
    async fn delete(&self, user_id: &UserId, label_id: &LabelId) -> Result<bool, DomainError>;
}
