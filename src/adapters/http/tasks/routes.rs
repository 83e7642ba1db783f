//! Axum router configuration for task endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_subtask, create_task, delete_task, get_task, list_tasks, update_task, TasksAppState,
};

/// Task routes (all require authentication).
///
/// - `GET /` - List tasks (filter by project/status)
/// - `POST /` - Create a task
/// - `GET /{id}` - Fetch a task
/// - `PATCH /{id}` - Partially update a task
/// - `DELETE /{id}` - Delete a task
/// - `POST /{id}/subtasks` - Add a subtask
pub fn tasks_router() -> Router<TasksAppState> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/:id",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/:id/subtasks", post(add_subtask))
}
