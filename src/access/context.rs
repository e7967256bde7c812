//! Explicit caller context threaded through every lifecycle operation.

use crate::access::bearer::{BearerParseError, BearerToken};
use crate::identity::domain::{Role, UserId, UserProfile};
use crate::identity::ports::{DirectoryError, IdentityDirectory};

/// Resolved caller identity plus the credential it was resolved from.
///
/// Built once per inbound call and passed explicitly into lifecycle
/// operations; never held in ambient or thread-local state. The raw token
/// is retained so outbound calls serving the same request forward it
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    profile: UserProfile,
    token: BearerToken,
}

impl CallerContext {
    /// Pairs a resolved profile with the credential it came from.
    #[must_use]
    pub const fn new(profile: UserProfile, token: BearerToken) -> Self {
        Self { profile, token }
    }

    /// Returns the resolved caller profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        self.profile.id()
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.profile.role()
    }

    /// Returns the bearer token for forwarding on outbound hops.
    #[must_use]
    pub const fn token(&self) -> &BearerToken {
        &self.token
    }
}

/// Errors raised while establishing a caller context.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticateError {
    /// The authorization header was absent or malformed.
    #[error(transparent)]
    Bearer(#[from] BearerParseError),

    /// The credential failed directory resolution.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl AuthenticateError {
    /// Maps the failure onto the shared error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> crate::access::ErrorKind {
        match self {
            Self::Bearer(_) => crate::access::ErrorKind::Unauthenticated,
            Self::Directory(err) => err.kind(),
        }
    }
}

/// Establishes a caller context from a raw authorization header value.
///
/// This is the per-hop gateway step: header parsing happens before any
/// directory traffic, and the directory is consulted exactly once.
///
/// # Errors
///
/// Returns [`AuthenticateError`] when the header is missing or malformed,
/// or when the directory rejects the credential.
pub async fn authenticate(
    header: Option<&str>,
    directory: &dyn IdentityDirectory,
) -> Result<CallerContext, AuthenticateError> {
    let token = BearerToken::from_header(header)?;
    let profile = directory.resolve_profile(&token).await?;
    Ok(CallerContext::new(profile, token))
}
