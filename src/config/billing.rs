//! Billing configuration (Stripe, Apple IAP, Google Play)
//!
//! Every billing integration is optional: a missing secret disables the
//! corresponding feature at use time (surfaced as `NotConfigured`) rather than
//! failing startup. Validation only rejects values that are present but
//! malformed.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Billing configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...)
    #[serde(default)]
    pub stripe_secret_key: Option<SecretString>,

    /// Stripe webhook signing secret (whsec_...)
    #[serde(default)]
    pub stripe_webhook_secret: Option<SecretString>,

    /// Stripe price id for the one-time premium purchase
    #[serde(default)]
    pub stripe_price_id: Option<String>,

    /// Apple shared secret for receipt verification
    #[serde(default)]
    pub apple_shared_secret: Option<SecretString>,

    /// Google Play package name (e.g. "com.example.taskfolio")
    #[serde(default)]
    pub google_package_name: Option<String>,

    /// Google service-account credentials JSON blob
    #[serde(default)]
    pub google_service_account_json: Option<SecretString>,
}

impl BillingConfig {
    /// Checkout is available only with both a secret key and a price id.
    pub fn checkout_enabled(&self) -> bool {
        self.stripe_secret_key
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty())
            && self.stripe_price_id.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Webhook handling requires the signing secret.
    pub fn webhook_secret(&self) -> Option<&SecretString> {
        self.stripe_webhook_secret
            .as_ref()
            .filter(|s| !s.expose_secret().is_empty())
    }

    /// Apple receipt verification requires the shared secret.
    pub fn apple_shared_secret(&self) -> Option<&SecretString> {
        self.apple_shared_secret
            .as_ref()
            .filter(|s| !s.expose_secret().is_empty())
    }

    /// Google verification requires a package name and service-account credentials.
    pub fn google_enabled(&self) -> bool {
        self.google_package_name
            .as_deref()
            .is_some_and(|p| !p.is_empty())
            && self
                .google_service_account_json
                .as_ref()
                .is_some_and(|s| !s.expose_secret().is_empty())
    }

    /// Validate billing configuration
    ///
    /// Present-but-malformed values are rejected; absent values are fine.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(key) = &self.stripe_secret_key {
            if !key.expose_secret().is_empty() && !key.expose_secret().starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.expose_secret().is_empty() && !secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        Ok(())
    }
}
