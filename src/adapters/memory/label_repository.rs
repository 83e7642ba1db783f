//! In-memory implementation of the label repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, LabelId, UserId};
use crate::domain::tasks::Label;
use crate::ports::LabelRepository;

/// In-memory label repository for tests and local development.
#[derive(Default)]
pub struct InMemoryLabelRepository {
    labels: Mutex<HashMap<LabelId, Label>>,
}

impl InMemoryLabelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LabelRepository for InMemoryLabelRepository {
    async fn create(&self, label: &Label) -> Result<(), DomainError> {
        self.labels.lock().unwrap().insert(label.id, label.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        label_id: &LabelId,
    ) -> Result<Option<Label>, DomainError> {
        Ok(self
            .labels
            .lock()
            .unwrap()
            .get(label_id)
            .filter(|l| &l.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Label>, DomainError> {
        let labels = self.labels.lock().unwrap();
        let mut matching: Vec<Label> = labels
            .values()
            .filter(|l| &l.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }

    async fn update(&self, label: &Label) -> Result<(), DomainError> {
        let mut labels = self.labels.lock().unwrap();
        match labels.get_mut(&label.id) {
            Some(existing) if existing.user_id == label.user_id => {
                *existing = label.clone();
                Ok(())
            }
            _ => Err(DomainError::new(ErrorCode::LabelNotFound, "Label not found")),
        }
    }

    async fn delete(&self, user_id: &UserId, label_id: &LabelId) -> Result<bool, DomainError> {
        let mut labels = self.labels.lock().unwrap();
        let owned = labels
            .get(label_id)
            .map_or(false, |l| &l.user_id == user_id);
        if owned {
            labels.remove(label_id);
        }
        Ok(owned)
    }
}
