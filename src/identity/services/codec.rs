//! HMAC-signed token issuance and verification.
//!
//! Tokens are self-contained HS256 JWTs carrying the subject's identifier
//! and role. Verification is a pure local check against the shared signing
//! secret, which is what makes per-hop token resolution cheap enough to
//! repeat on every service boundary.

use crate::identity::domain::{ParseRoleError, Role, UserId};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Environment variable supplying the signing secret.
const SECRET_ENV: &str = "TASKBOARD_TOKEN_SECRET";

/// Errors returned by token issuance and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("failed to sign token")]
    Signing,

    /// Signature, structure, or expiry validation failed.
    #[error("invalid or expired token")]
    Invalid,

    /// The verified token carried an out-of-domain role claim.
    #[error(transparent)]
    UnknownRole(#[from] ParseRoleError),

    /// The system clock is before the Unix epoch.
    #[error("system clock is before the Unix epoch")]
    ClockSkew,
}

/// Identity claims embedded in every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Caller role in canonical claim form.
    pub role: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: u64,
}

impl Claims {
    /// Returns the subject as a typed user identifier.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }

    /// Parses the role claim.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRoleError`] when the claim is outside the role domain.
    pub fn parsed_role(&self) -> Result<Role, ParseRoleError> {
        Role::try_from(self.role.as_str())
    }
}

/// Signing configuration shared by every service instance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HMAC signing secret.
    pub secret: String,
    /// Lifetime stamped into each issued token.
    pub token_expiry: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var(SECRET_ENV).unwrap_or_else(|_| {
                // Random per-process secret when none is configured; fine
                // for tests, useless across real service instances.
                use rand::Rng;
                let mut rng = rand::thread_rng();
                let secret: [u8; 32] = rng.r#gen();
                hex::encode(secret)
            }),
            token_expiry: Duration::from_secs(3600),
        }
    }
}

/// Issues and verifies signed identity tokens.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    config: TokenConfig,
}

impl TokenCodec {
    /// Creates a codec over the given signing configuration.
    #[must_use]
    pub const fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Issues a signed token for the given subject and role.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ClockSkew`] when the system clock predates the
    /// Unix epoch, or [`TokenError::Signing`] when encoding fails.
    pub fn issue(&self, user_id: &UserId, role: Role) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::ClockSkew)?
            .as_secs();

        let claims = Claims {
            sub: user_id.as_str().to_owned(),
            role: role.as_str().to_owned(),
            iat: now,
            exp: now + self.config.token_expiry.as_secs(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_ref()),
        )
        .map_err(|_| TokenError::Signing)
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for any structural, signature, or
    /// expiry failure.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::Invalid)
    }
}
