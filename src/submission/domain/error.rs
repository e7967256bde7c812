//! Error types for submission domain parsing.

use thiserror::Error;

/// Error returned while parsing review decisions and persisted statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown submission status: {0}")]
pub struct ParseSubmissionStatusError(pub String);
