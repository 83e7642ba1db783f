//! HTTP adapter for task endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::TasksAppState;
pub use routes::tasks_router;
