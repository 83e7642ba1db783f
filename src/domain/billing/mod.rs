//! Entitlement reconciliation domain.
//!
//! Three partially-trusted external signals (a Stripe webhook, an Apple
//! receipt blob, a Google Play purchase token), each verified against its
//! issuing authority, converging on one state transition:
//! `Free -> Premium(expires_at)`.

mod apple;
mod entitlement;
mod errors;
mod google;
mod stripe_event;
mod webhook_verifier;

pub use apple::{AppleReceiptVerifier, PRODUCTION_VERIFY_URL, SANDBOX_VERIFY_URL};
pub use entitlement::{EntitlementState, PremiumGrant, PREMIUM_GRANT_DAYS};
pub use errors::{VerifyError, WebhookError};
pub use google::GooglePurchaseVerifier;
pub use stripe_event::{CheckoutSessionObject, StripeEvent, StripeEventData, StripeEventType};
pub use webhook_verifier::{SignatureHeader, StripeWebhookVerifier};

#[cfg(test)]
pub use webhook_verifier::compute_test_signature;
