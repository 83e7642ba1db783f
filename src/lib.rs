//! Taskfolio - Task tracking backend.
//!
//! Tasks, projects, and labels behind a REST API, with a multi-issuer
//! bearer-token verifier and premium entitlements reconciled from Stripe,
//! Apple, and Google Play purchase signals.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
