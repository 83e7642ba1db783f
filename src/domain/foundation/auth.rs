//! Authentication types for the domain layer.
//!
//! These types represent a verified identity extracted from a bearer
//! credential. They have no provider dependencies; the `TokenVerifier`
//! populates them regardless of which issuer signed the token.

use std::fmt;

use thiserror::Error;

use super::UserId;

/// Which authority signed the verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenIssuer {
    /// The managed identity provider (Supabase-style, standard `sub` claim).
    Managed,
    /// The application's own signing key (`user_id` claim).
    SelfIssued,
}

impl fmt::Display for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenIssuer::Managed => write!(f, "managed"),
            TokenIssuer::SelfIssued => write!(f, "self-issued"),
        }
    }
}

/// Identity produced by a successful credential verification.
///
/// Ephemeral: created once per inbound request and scoped to that request's
/// lifetime, never persisted.
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    /// The subject the credential was issued for.
    pub user_id: UserId,

    /// Which issuer's signature checked out.
    pub issuer: TokenIssuer,
}

impl VerifiedIdentity {
    /// Creates a new verified identity.
    pub fn new(user_id: UserId, issuer: TokenIssuer) -> Self {
        Self { user_id, issuer }
    }
}

/// Credential verification failures.
///
/// Deliberately coarse: callers learn that a credential was malformed or
/// invalid, never which issuer rejected it or why (issuer-oracle prevention).
/// The fine-grained reason goes to the log, not the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential does not decompose into `Bearer <payload>`.
    #[error("Malformed credential")]
    MalformedCredential,

    /// Signature or claim validation failed against every configured issuer.
    #[error("Invalid credential")]
    InvalidCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verified_identity_carries_subject_and_issuer() {
        let identity = VerifiedIdentity::new(
            UserId::new("user-123").unwrap(),
            TokenIssuer::SelfIssued,
        );
        assert_eq!(identity.user_id.as_str(), "user-123");
        assert_eq!(identity.issuer, TokenIssuer::SelfIssued);
    }

    #[test]
    fn token_issuer_displays_lowercase_names() {
        assert_eq!(TokenIssuer::Managed.to_string(), "managed");
        assert_eq!(TokenIssuer::SelfIssued.to_string(), "self-issued");
    }

    #[test]
    fn auth_error_messages_do_not_name_an_issuer() {
        for err in [AuthError::MalformedCredential, AuthError::InvalidCredential] {
            let message = err.to_string();
            assert!(!message.contains("managed"));
            assert!(!message.contains("self"));
        }
    }
}
