//! Project entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, UserId, ValidationError};

/// A project/list grouping tasks, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub user_id: UserId,
    pub name: String,
    /// Hex color like "#ff8800"; optional.
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project for `user_id`.
    pub fn create(
        user_id: UserId,
        name: impl Into<String>,
        color: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if let Some(color) = &color {
            validate_color(color)?;
        }

        Ok(Self {
            id: ProjectId::new(),
            user_id,
            name,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames and/or recolors the project.
    pub fn update(
        &mut self,
        name: Option<String>,
        color: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("name"));
            }
            self.name = name;
        }
        if let Some(color) = color {
            validate_color(&color)?;
            self.color = Some(color);
        }
        self.updated_at = now;
        Ok(())
    }
}

pub(crate) fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::invalid_format(
            "color",
            "expected '#rrggbb'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn create_accepts_valid_color() {
        let project = Project::create(owner(), "Inbox", Some("#ff8800".to_string()), Utc::now());
        assert!(project.is_ok());
    }

    #[test]
    fn create_rejects_blank_name() {
        let result = Project::create(owner(), "  ", None, Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn create_rejects_malformed_color() {
        for bad in ["ff8800", "#ff88", "#gg8800"] {
            let result = Project::create(owner(), "Inbox", Some(bad.to_string()), Utc::now());
            assert!(result.is_err(), "color {:?} should be rejected", bad);
        }
    }

    #[test]
    fn update_changes_name_and_bumps_timestamp() {
        let created = Utc::now();
        let mut project = Project::create(owner(), "Inbox", None, created).unwrap();

        let later = created + chrono::Duration::seconds(3);
        project
            .update(Some("Work".to_string()), None, later)
            .unwrap();

        assert_eq!(project.name, "Work");
        assert_eq!(project.updated_at, later);
    }
}
