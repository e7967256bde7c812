//! Repository ports for task documents and the history log.

use crate::identity::domain::UserId;
use crate::page::{Page, PageRequest};
use crate::task::domain::{Task, TaskHistoryEntry, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task document persistence contract.
///
/// `save` is insert-or-replace: tasks are mutated read-modify-write with no
/// locking, so concurrent saves of the same task are last-write-wins at the
/// store. Listing operations return items in insertion order with an
/// unbounded total count over the same filter.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts or replaces a task document.
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Removes a task document. Returns `false` when it was absent.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Pages all tasks, optionally narrowed by status.
    async fn list(
        &self,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>>;

    /// Pages tasks visible to a non-admin user: assigned to them or open
    /// to all, narrowed to `{Assigned, Done}` unless `status` narrows
    /// further.
    async fn list_visible_to(
        &self,
        user_id: &UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>>;

    /// Pages tasks whose assignment set contains the user, optionally
    /// narrowed by status.
    async fn list_assigned_to(
        &self,
        user_id: &UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>>;
}

/// Append-only history log contract.
///
/// There is deliberately no update or delete surface, and entries are
/// retained after their task is deleted.
#[async_trait]
pub trait TaskHistoryRepository: Send + Sync {
    /// Appends one history entry.
    async fn append(&self, entry: &TaskHistoryEntry) -> TaskRepositoryResult<()>;

    /// Returns all entries for a task in insertion order.
    async fn for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
