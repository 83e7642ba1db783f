//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum routers, handlers, and auth middleware
//! - `postgres` - sqlx repositories and the user store
//! - `memory` - in-memory doubles for tests and local development
//! - `stripe` - checkout session creation against the Stripe API
//! - `apple` - receipt verification transport
//! - `google` - Play purchase verification transport (placeholder)

pub mod apple;
pub mod google;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
