//! Billing handlers.
//!
//! Command handlers for the entitlement reconciliation flows:
//!
//! - Creating the checkout session (attaches the user association the
//!   webhook later depends on)
//! - Processing payment-processor webhook deliveries
//! - Verifying Apple receipts and Google Play purchases

mod create_checkout;
mod handle_stripe_webhook;
mod verify_apple_receipt;
mod verify_google_purchase;

pub use create_checkout::{
    CreateCheckoutCommand, CreateCheckoutError, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use handle_stripe_webhook::{
    HandleStripeWebhookCommand, HandleStripeWebhookHandler, HandleStripeWebhookResult,
};
pub use verify_apple_receipt::{VerifyAppleReceiptCommand, VerifyAppleReceiptHandler};
pub use verify_google_purchase::{VerifyGooglePurchaseCommand, VerifyGooglePurchaseHandler};
