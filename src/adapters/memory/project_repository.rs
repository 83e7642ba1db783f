//! In-memory implementation of the project repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, UserId};
use crate::domain::tasks::Project;
use crate::ports::ProjectRepository;

/// In-memory project repository for tests and local development.
#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<HashMap<ProjectId, Project>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: &Project) -> Result<(), DomainError> {
        self.projects
            .lock()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        project_id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .get(project_id)
            .filter(|p| &p.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<Project>, DomainError> {
        let projects = self.projects.lock().unwrap();
        let mut matching: Vec<Project> = projects
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }

    async fn update(&self, project: &Project) -> Result<(), DomainError> {
        let mut projects = self.projects.lock().unwrap();
        match projects.get_mut(&project.id) {
            Some(existing) if existing.user_id == project.user_id => {
                *existing = project.clone();
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )),
        }
    }

    async fn delete(&self, user_id: &UserId, project_id: &ProjectId) -> Result<bool, DomainError> {
        let mut projects = self.projects.lock().unwrap();
        let owned = projects
            .get(project_id)
            .map_or(false, |p| &p.user_id == user_id);
        if owned {
            projects.remove(project_id);
        }
        Ok(owned)
    }
}
