//! Shared error taxonomy exposed by every service-layer error.

use serde::{Deserialize, Serialize};

/// Structured error category carried alongside human-readable messages.
///
/// Every lifecycle error maps to exactly one kind so callers can branch on
/// "retry later", "fix the request", or "not allowed" without parsing
/// free-text messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The bearer credential was absent, malformed, or failed verification.
    Unauthenticated,
    /// The credential is valid but the caller's role or ownership is
    /// insufficient.
    Forbidden,
    /// A referenced task, submission, or user does not exist.
    NotFound,
    /// A request value fell outside its domain (bad enum string, bad page).
    InvalidArgument,
    /// The operation is not legal for the entity's current status.
    InvalidState,
    /// A downstream service could not be reached.
    DependencyUnavailable,
    /// A downstream call reached the service but failed after a local state
    /// change had already committed.
    DependencyFailure,
}

impl ErrorKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InvalidArgument => "invalid_argument",
            Self::InvalidState => "invalid_state",
            Self::DependencyUnavailable => "dependency_unavailable",
            Self::DependencyFailure => "dependency_failure",
        }
    }

    /// True when retrying the same request later may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::DependencyUnavailable | Self::DependencyFailure)
    }
}
