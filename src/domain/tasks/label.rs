//! Label entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LabelId, UserId, ValidationError};

use super::project::validate_color;

/// A label/tag attachable to tasks, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub user_id: UserId,
    pub name: String,
    /// Hex color like "#00aaff"; optional.
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Label {
    /// Creates a new label for `user_id`.
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
            id: LabelId::new(),
            user_id,
            name,
            color,
            created_at: now,
            updated_at: now,
        })
    }

    /// Renames and/or recolors the label.
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
