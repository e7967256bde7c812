//! Thread-safe in-memory submission store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::page::{Page, PageRequest};
use crate::submission::{
    domain::{Submission, SubmissionId},
    ports::{SubmissionRepository, SubmissionRepositoryError, SubmissionRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory submission repository.
///
/// Keeps insertion order so listing results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionRepository {
    state: Arc<RwLock<InMemorySubmissionState>>,
}

#[derive(Debug, Default)]
struct InMemorySubmissionState {
    submissions: HashMap<SubmissionId, Submission>,
    order: Vec<SubmissionId>,
}

impl InMemorySubmissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(
        &self,
        predicate: impl Fn(&Submission) -> bool,
    ) -> SubmissionRepositoryResult<Vec<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.submissions.get(id))
            .filter(|submission| predicate(submission))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn save(&self, submission: &Submission) -> SubmissionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.submissions.contains_key(&submission.id()) {
            state.order.push(submission.id());
        }
        state.submissions.insert(submission.id(), submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: SubmissionId) -> SubmissionRepositoryResult<Option<Submission>> {
        let state = self.state.read().map_err(|err| {
            SubmissionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.submissions.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> SubmissionRepositoryResult<Page<Submission>> {
        let filtered = self.filtered(|_| true)?;
        Ok(Page::from_filtered(filtered, page))
    }

    async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> SubmissionRepositoryResult<Page<Submission>> {
        let filtered = self.filtered(|submission| submission.task_id() == task_id)?;
        Ok(Page::from_filtered(filtered, page))
    }
}
