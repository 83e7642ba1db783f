//! Self-issued token signing.
//!
//! Mints the HS256 tokens that [`super::TokenVerifier`] accepts on its
//! self-issued path. Signup/login flows call this after credential checks;
//! the claims shape mirrors what the verifier parses.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Failure to produce a signed token.
#[derive(Debug, Error)]
pub enum TokenSignError {
    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Claims embedded in self-issued tokens.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    user_id: &'a str,
    email: &'a str,
    exp: i64,
    iat: i64,
}

/// Signs self-issued tokens with the application secret.
pub struct TokenSigner {
    secret: SecretString,
    ttl: Duration,
}

impl TokenSigner {
    /// Creates a signer with the given secret and token lifetime.
    pub fn new(secret: SecretString, ttl_secs: i64) -> Self {
        Self {
            secret,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issues a signed token for the given user, valid from `now` for the
    /// configured lifetime.
    pub fn issue(
        &self,
        user_id: &UserId,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenSignError> {
        let claims = Claims {
            user_id: user_id.as_str(),
            email,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )?;

        Ok(token)
    }
}
