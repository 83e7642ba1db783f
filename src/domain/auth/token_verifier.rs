//! Multi-issuer bearer credential verification.
//!
//! Tokens may be signed by a managed identity provider (shared HS256
//! verification secret, standard `sub` claim) or by the application itself
//! (`user_id` claim). Verification is ordered and short-circuiting: the
//! managed issuer is tried first when configured, then the self-issued
//! secret. The first success wins and no partial state is carried across
//! attempts.
//!
//! # Security
//!
//! - Claims are parsed into strongly-typed structs; unknown or malformed
//!   claim shapes are rejected at the boundary.
//! - Expiry is checked against the caller-supplied `now`, keeping
//!   verification a pure function of its inputs.
//! - Failures are collapsed to [`AuthError::InvalidCredential`]; which issuer
//!   rejected the token is logged, never returned.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, TokenIssuer, UserId, VerifiedIdentity};

/// Managed identity provider settings needed for verification.
///
/// Both fields are required; a partially-configured managed issuer is never
/// constructed (config validation rejects it upstream).
#[derive(Clone)]
pub struct ManagedIssuer {
    /// Issuer URL, kept for diagnostics only.
    pub url: String,

    /// Shared HS256 verification secret.
    pub secret: SecretString,
}

impl ManagedIssuer {
    pub fn new(url: impl Into<String>, secret: SecretString) -> Self {
        Self {
            url: url.into(),
            secret,
        }
    }
}

/// Claims shape for managed-issuer tokens.
///
/// Only the claims the application consumes are declared; the subject is the
/// standard `sub` claim.
#[derive(Debug, Deserialize)]
struct ManagedClaims {
    sub: String,
    exp: i64,
}

/// Claims shape for self-issued tokens.
#[derive(Debug, Deserialize)]
struct SelfIssuedClaims {
    user_id: String,
    exp: i64,
}

/// Verifies bearer credentials against the configured issuers.
///
/// Pure: the outcome depends only on the credential, the configured secrets,
/// and the supplied `now`.
pub struct TokenVerifier {
    managed: Option<ManagedIssuer>,
    self_issued_secret: SecretString,
}

impl TokenVerifier {
    /// Creates a verifier with an optional managed issuer and the mandatory
    /// self-issued signing secret.
    pub fn new(managed: Option<ManagedIssuer>, self_issued_secret: SecretString) -> Self {
        Self {
            managed,
            self_issued_secret,
        }
    }

    /// Verifies a bearer credential.
    ///
    /// `credential` is the full `Authorization` header value
    /// (`Bearer <token>`). Returns the verified identity, or:
    ///
    /// - [`AuthError::MalformedCredential`] when the header does not
    ///   decompose into the `bearer` scheme plus a non-empty payload
    /// - [`AuthError::InvalidCredential`] when every configured issuer
    ///   rejects the payload
    pub fn verify(
        &self,
        credential: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, AuthError> {
        let payload = strip_bearer_scheme(credential)?;

        // Managed issuer first: a managed-signature success is authoritative
        // and short-circuits, so a token from the managed provider is never
        // tried against the local secret.
        if let Some(managed) = &self.managed {
            match self.verify_managed(payload, now, managed) {
                Ok(identity) => return Ok(identity),
                Err(reason) => {
                    tracing::debug!(issuer = %TokenIssuer::Managed, %reason, "token rejected");
                }
            }
        }

        match self.verify_self_issued(payload, now) {
            Ok(identity) => Ok(identity),
            Err(reason) => {
                tracing::debug!(issuer = %TokenIssuer::SelfIssued, %reason, "token rejected");
                Err(AuthError::InvalidCredential)
            }
        }
    }

    fn verify_managed(
        &self,
        payload: &str,
        now: DateTime<Utc>,
        managed: &ManagedIssuer,
    ) -> Result<VerifiedIdentity, String> {
        let claims: ManagedClaims =
            decode_hs256(payload, managed.secret.expose_secret().as_bytes())
                .map_err(|e| e.to_string())?;

        if claims.exp <= now.timestamp() {
            return Err("token expired".to_string());
        }

        let user_id = UserId::new(claims.sub).map_err(|e| e.to_string())?;
        Ok(VerifiedIdentity::new(user_id, TokenIssuer::Managed))
    }

    fn verify_self_issued(
        &self,
        payload: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedIdentity, String> {
        let claims: SelfIssuedClaims =
            decode_hs256(payload, self.self_issued_secret.expose_secret().as_bytes())
                .map_err(|e| e.to_string())?;

        if claims.exp <= now.timestamp() {
            return Err("token expired".to_string());
        }

        let user_id = UserId::new(claims.user_id).map_err(|e| e.to_string())?;
        Ok(VerifiedIdentity::new(user_id, TokenIssuer::SelfIssued))
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("managed_issuer", &self.managed.as_ref().map(|m| &m.url))
            .finish_non_exhaustive()
    }
}

/// Splits `Bearer <payload>` into its payload.
///
/// The scheme is matched case-insensitively; the payload must be non-empty.
fn strip_bearer_scheme(credential: &str) -> Result<&str, AuthError> {
    let (scheme, payload) = credential
        .split_once(' ')
        .ok_or(AuthError::MalformedCredential)?;

    if !scheme.eq_ignore_ascii_case("bearer") || payload.is_empty() {
        return Err(AuthError::MalformedCredential);
    }

    Ok(payload)
}

/// Decodes an HS256 token into typed claims.
///
/// jsonwebtoken's own expiry validation is disabled; callers check `exp`
/// against their injected clock instead.
fn decode_hs256<T: serde::de::DeserializeOwned>(
    token: &str,
    secret: &[u8],
) -> Result<T, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    decode::<T>(token, &DecodingKey::from_secret(secret), &validation).map(|data| data.claims)
}
