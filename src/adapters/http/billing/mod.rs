//! HTTP adapter for billing endpoints.
//!
//! - `POST /api/billing/checkout` - Start the premium checkout flow
//! - `POST /api/billing/apple/verify` - Verify an Apple IAP receipt
//! - `POST /api/billing/google/verify` - Verify a Google Play purchase
//! - `POST /api/billing/webhooks/stripe` - Payment-processor webhooks
//!   (no bearer auth; authenticated by signature)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::billing_router;
