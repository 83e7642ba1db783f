//! HTTP adapter for project and label endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ProjectsAppState;
pub use routes::{labels_router, projects_router};
