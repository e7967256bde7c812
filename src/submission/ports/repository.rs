//! Repository ports for submissions and their comments.

use crate::page::{Page, PageRequest};
use crate::submission::domain::{Submission, SubmissionComment, SubmissionId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for submission repository operations.
pub type SubmissionRepositoryResult<T> = Result<T, SubmissionRepositoryError>;

/// Submission document persistence contract.
///
/// `save` is insert-or-replace; review decisions re-save the whole
/// document, last-write-wins. Listing operations return items in insertion
/// order with an unbounded total count.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Inserts or replaces a submission document.
    async fn save(&self, submission: &Submission) -> SubmissionRepositoryResult<()>;

    /// Finds a submission by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: SubmissionId) -> SubmissionRepositoryResult<Option<Submission>>;

    /// Pages all submissions.
    async fn list(&self, page: PageRequest) -> SubmissionRepositoryResult<Page<Submission>>;

    /// Pages submissions referencing one task.
    async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> SubmissionRepositoryResult<Page<Submission>>;
}

/// Append-only comment store contract.
#[async_trait]
pub trait SubmissionCommentRepository: Send + Sync {
    /// Appends one comment.
    async fn append(&self, comment: &SubmissionComment) -> SubmissionRepositoryResult<()>;

    /// Returns all comments for a submission in insertion order.
    async fn for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> SubmissionRepositoryResult<Vec<SubmissionComment>>;
}

/// Errors returned by submission repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SubmissionRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SubmissionRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
