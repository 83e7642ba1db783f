//! Task tracking entities: tasks, projects, labels.
//!
//! Thin owner-scoped CRUD domain. The only cross-cutting rule is that every
//! entity belongs to exactly one user and all access is filtered by owner.

mod label;
mod project;
mod task;

pub use label::Label;
pub use project::Project;
pub use task::{NewTask, Subtask, Task, TaskStatus, TaskUpdate};
