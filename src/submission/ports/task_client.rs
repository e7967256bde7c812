//! Client port for the remote task service.
//!
//! The submission service never reaches into the task store directly; it
//! speaks to the task service through this port, forwarding the caller's
//! bearer token unchanged so the remote hop can resolve the caller
//! independently.

use crate::access::{BearerToken, ErrorKind};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task client calls.
pub type TaskClientResult<T> = Result<T, TaskClientError>;

/// Synchronous request/response boundary into the task service.
#[async_trait]
pub trait TaskServiceClient: Send + Sync {
    /// Fetches a task, forwarding the caller's token.
    async fn get_task(&self, task_id: TaskId, token: &BearerToken) -> TaskClientResult<Task>;

    /// Requests task completion, forwarding the caller's token.
    ///
    /// Completion is idempotent on the remote side, so callers may retry
    /// this call safely after a [`TaskClientError::Unavailable`] failure.
    async fn complete_task(&self, task_id: TaskId, token: &BearerToken) -> TaskClientResult<Task>;
}

/// Errors returned by task service client implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskClientError {
    /// The task service could not be reached.
    #[error("task service unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The task service was reached and reported a failure.
    #[error("task service rejected the call ({kind:?}): {message}")]
    Remote {
        /// Structured category reported by the remote service.
        kind: ErrorKind,
        /// Human-readable remote message.
        message: String,
    },
}

impl TaskClientError {
    /// Wraps a transport failure.
    #[must_use]
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Maps the failure onto the shared error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::DependencyUnavailable,
            Self::Remote { kind, .. } => *kind,
        }
    }
}
