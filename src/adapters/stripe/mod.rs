//! Stripe adapters.

mod checkout;

pub use checkout::{StripeCheckoutConfig, StripeCheckoutGateway};
