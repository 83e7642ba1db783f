//! HTTP adapter for user endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UsersAppState;
pub use routes::users_router;
