//! Directory port resolving bearer tokens to caller profiles.

use crate::access::{BearerToken, ErrorKind};
use crate::identity::domain::{UserId, UserProfile};
use crate::identity::services::TokenError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Caller identity resolution contract.
///
/// Every service hop resolves the forwarded token independently through
/// this port; there is deliberately no cross-hop cache.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolves a bearer token to the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidToken`] when verification fails and
    /// [`DirectoryError::UnknownSubject`] when the token's subject has no
    /// profile.
    async fn resolve_profile(&self, token: &BearerToken) -> DirectoryResult<UserProfile>;

    /// Lists every known profile.
    async fn list_profiles(&self) -> DirectoryResult<Vec<UserProfile>>;
}

/// Errors returned by identity directory implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    /// The token failed signature or expiry verification.
    #[error("token verification failed: {0}")]
    InvalidToken(#[from] TokenError),

    /// The token verified but its subject has no profile.
    #[error("no profile for subject: {0}")]
    UnknownSubject(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Maps the failure onto the shared error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken(_) | Self::UnknownSubject(_) => ErrorKind::Unauthenticated,
            Self::Persistence(_) => ErrorKind::DependencyUnavailable,
        }
    }
}
