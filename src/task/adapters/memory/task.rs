//! Thread-safe in-memory task document store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::UserId;
use crate::page::{Page, PageRequest};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Keeps insertion order so listing results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
}

impl InMemoryTaskState {
    /// Returns tasks matching a predicate, in insertion order.
    fn filtered(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .filter(|task| predicate(task))
            .cloned()
            .collect()
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Statuses a non-admin sees when no explicit filter narrows the view.
const MEMBER_VISIBLE_STATUSES: [TaskStatus; 2] = [TaskStatus::Assigned, TaskStatus::Done];

fn status_matches(task: &Task, status: Option<TaskStatus>) -> bool {
    status.is_none_or(|wanted| task.status() == wanted)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            state.order.push(task.id());
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state.tasks.remove(&id).is_some();
        if removed {
            state.order.retain(|existing| *existing != id);
        }
        Ok(removed)
    }

    async fn list(
        &self,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.read_state()?;
        let filtered = state.filtered(|task| status_matches(task, status));
        Ok(Page::from_filtered(filtered, page))
    }

    async fn list_visible_to(
        &self,
        user_id: &UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.read_state()?;
        let filtered = state.filtered(|task| {
            let status_ok = status.map_or_else(
                || MEMBER_VISIBLE_STATUSES.contains(&task.status()),
                |wanted| task.status() == wanted,
            );
            task.is_visible_to(user_id) && status_ok
        });
        Ok(Page::from_filtered(filtered, page))
    }

    async fn list_assigned_to(
        &self,
        user_id: &UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.read_state()?;
        let filtered =
            state.filtered(|task| task.is_assigned_to(user_id) && status_matches(task, status));
        Ok(Page::from_filtered(filtered, page))
    }
}
