//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure, plus
//! the shared authentication middleware.

pub mod billing;
pub mod middleware;
pub mod projects;
pub mod tasks;
pub mod users;

pub use billing::{billing_router, BillingAppState};
pub use projects::{labels_router, projects_router, ProjectsAppState};
pub use tasks::{tasks_router, TasksAppState};
pub use users::{users_router, UsersAppState};
