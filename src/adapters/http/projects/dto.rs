//! HTTP DTOs for project and label endpoints.

use serde::Deserialize;

/// Request to create a project or label.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNamedRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Partial update for a project or label.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNamedRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}
