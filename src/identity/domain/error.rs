//! Error types for identity domain parsing.

use thiserror::Error;

/// Error returned while parsing roles from claims or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
