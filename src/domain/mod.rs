//! Domain layer - pure business logic.
//!
//! No I/O happens here: verification primitives are pure functions of their
//! inputs plus constructor-injected secrets, and anything that must reach
//! the outside world goes through a port.

pub mod auth;
pub mod billing;
pub mod foundation;
pub mod tasks;
