//! Thread-safe in-memory append-only comment store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::submission::{
    domain::{SubmissionComment, SubmissionId},
    ports::{SubmissionCommentRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};

/// Thread-safe in-memory comment store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionCommentRepository {
    comments: Arc<RwLock<Vec<SubmissionComment>>>,
}

impl InMemorySubmissionCommentRepository {
    /// Creates an empty comment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionCommentRepository for InMemorySubmissionCommentRepository {
    async fn append(&self, comment: &SubmissionComment) -> SubmissionRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        comments.push(comment.clone());
        Ok(())
    }

    async fn for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> SubmissionRepositoryResult<Vec<SubmissionComment>> {
        let comments = self.comments.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(comments
            .iter()
            .filter(|comment| comment.submission_id() == submission_id)
            .cloned()
            .collect())
    }
}
