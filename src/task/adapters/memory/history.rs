//! Thread-safe in-memory append-only history log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskHistoryEntry, TaskId},
    ports::{TaskHistoryRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory history log.
///
/// Append-only: the backing vector is only ever pushed to, so readers see
/// entries in write order without further coordination.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskHistoryRepository {
    entries: Arc<RwLock<Vec<TaskHistoryEntry>>>,
}

impl InMemoryTaskHistoryRepository {
    /// Creates an empty history log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskHistoryRepository for InMemoryTaskHistoryRepository {
    async fn append(&self, entry: &TaskHistoryEntry) -> TaskRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let entries = self.entries.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .cloned()
            .collect())
    }
}
