//! Bearer credential extraction from `Authorization`-style header values.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scheme prefix required on every authenticated call.
const BEARER_PREFIX: &str = "Bearer ";

/// Errors returned while extracting a bearer credential.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerParseError {
    /// The header field was absent.
    #[error("missing authorization header")]
    MissingHeader,

    /// The header did not start with the `Bearer ` scheme prefix.
    #[error("malformed authorization header, expected 'Bearer <token>'")]
    MalformedScheme,

    /// The header carried the scheme prefix but no credential.
    #[error("empty bearer credential")]
    EmptyCredential,
}

/// Opaque bearer credential forwarded unchanged on every service hop.
///
/// The token is never re-minted or exchanged: the value extracted at the
/// first hop is the value presented to the identity directory at every
/// subsequent hop serving the same logical request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps an already-extracted credential.
    #[must_use]
    pub fn new(credential: impl Into<String>) -> Self {
        Self(credential.into())
    }

    /// Extracts the credential from an `Authorization` header value.
    ///
    /// Runs before any business logic: a missing or malformed header fails
    /// the call without touching the identity directory.
    ///
    /// # Errors
    ///
    /// Returns [`BearerParseError`] when the header is absent, lacks the
    /// `Bearer ` prefix, or carries an empty credential.
    pub fn from_header(header: Option<&str>) -> Result<Self, BearerParseError> {
        let value = header.ok_or(BearerParseError::MissingHeader)?;
        let credential = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or(BearerParseError::MalformedScheme)?;
        if credential.is_empty() {
            return Err(BearerParseError::EmptyCredential);
        }
        Ok(Self(credential.to_owned()))
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the token back into header form for an outbound hop.
    #[must_use]
    pub fn to_header_value(&self) -> String {
        format!("{BEARER_PREFIX}{}", self.0)
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{BearerParseError, BearerToken};

    #[test]
    fn extracts_credential_from_well_formed_header() {
        let token = BearerToken::from_header(Some("Bearer abc.def.ghi"));
        assert_eq!(token, Ok(BearerToken::new("abc.def.ghi")));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(
            BearerToken::from_header(None),
            Err(BearerParseError::MissingHeader)
        );
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        assert_eq!(
            BearerToken::from_header(Some("Basic dXNlcjpwYXNz")),
            Err(BearerParseError::MalformedScheme)
        );
    }

    #[test]
    fn scheme_is_case_sensitive() {
        assert_eq!(
            BearerToken::from_header(Some("bearer abc")),
            Err(BearerParseError::MalformedScheme)
        );
    }

    #[test]
    fn empty_credential_is_rejected() {
        assert_eq!(
            BearerToken::from_header(Some("Bearer ")),
            Err(BearerParseError::EmptyCredential)
        );
    }

    #[test]
    fn header_round_trip_preserves_credential() {
        let token = BearerToken::new("tok-123");
        let header = token.to_header_value();
        assert_eq!(BearerToken::from_header(Some(&header)), Ok(token));
    }
}
