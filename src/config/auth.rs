//! Authentication configuration
//!
//! Two token issuers are supported simultaneously: a managed identity provider
//! (Supabase-style, shared HS256 verification secret) and the application's own
//! self-issued tokens. The managed issuer is optional; it is considered enabled
//! only when both its URL and verification secret are present.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (managed + self-issued token issuers)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Managed identity provider URL (e.g. "https://xyz.supabase.co")
    #[serde(default)]
    pub managed_issuer_url: String,

    /// Shared secret used to verify managed-issuer tokens
    #[serde(default)]
    pub managed_issuer_secret: Option<SecretString>,

    /// Signing secret for self-issued tokens
    pub jwt_secret: SecretString,

    /// Lifetime of self-issued tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    /// The managed issuer is enabled only when both URL and secret are configured.
    pub fn managed_issuer_enabled(&self) -> bool {
        !self.managed_issuer_url.is_empty()
            && self
                .managed_issuer_secret
                .as_ref()
                .is_some_and(|s| !s.expose_secret().is_empty())
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the managed issuer URL. A managed
    /// issuer URL without a secret (or the reverse) is rejected so a half-set
    /// deployment fails loudly instead of silently disabling the issuer.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }

        let has_url = !self.managed_issuer_url.is_empty();
        let has_secret = self
            .managed_issuer_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        if has_url != has_secret {
            return Err(ValidationError::PartialIssuerConfig(
                "managed_issuer_url and managed_issuer_secret must be set together",
            ));
        }

        if has_url
            && *environment == Environment::Production
            && !self.managed_issuer_url.starts_with("https://")
        {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        Ok(())
    }
}

fn default_token_ttl() -> i64 {
    86_400
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AuthConfig {
        AuthConfig {
            managed_issuer_url: String::new(),
            managed_issuer_secret: None,
            jwt_secret: SecretString::new("local-signing-secret".to_string()),
            token_ttl_secs: default_token_ttl(),
        }
    }

    #[test]
    fn test_managed_issuer_disabled_by_default() {
        let config = base_config();
        assert!(!config.managed_issuer_enabled());
    }

    #[test]
    fn test_managed_issuer_requires_both_fields() {
        let mut config = base_config();
        config.managed_issuer_url = "https://auth.example.com".to_string();
        assert!(!config.managed_issuer_enabled());

        config.managed_issuer_secret = Some(SecretString::new("shared-secret".to_string()));
        assert!(config.managed_issuer_enabled());
    }

    #[test]
    fn test_validation_missing_jwt_secret() {
        let mut config = base_config();
        config.jwt_secret = SecretString::new(String::new());
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_partial_managed_issuer() {
        let mut config = base_config();
        config.managed_issuer_url = "https://auth.example.com".to_string();
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::PartialIssuerConfig(_))
        ));
    }

    #[test]
    fn test_validation_production_requires_https() {
        let mut config = base_config();
        config.managed_issuer_url = "http://auth.example.com".to_string();
        config.managed_issuer_secret = Some(SecretString::new("shared-secret".to_string()));

        assert!(config.validate(&Environment::Development).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let mut config = base_config();
        config.managed_issuer_url = "https://auth.example.com".to_string();
        config.managed_issuer_secret = Some(SecretString::new("shared-secret".to_string()));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_default_token_ttl_is_one_day() {
        let config = base_config();
        assert_eq!(config.token_ttl_secs, 86_400);
    }
}
