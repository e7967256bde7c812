//! Service layer for task creation, visibility, assignment, updates,
//! completion, and history reads.

use crate::access::{CallerContext, ErrorKind};
use crate::identity::domain::UserId;
use crate::page::{Page, PageRequest};
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskHistoryEntry, TaskId, TaskPatch, TaskStatus},
    ports::{TaskHistoryRepository, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The caller's role does not permit the operation.
    #[error("only admins may {action}")]
    AdminRequired {
        /// Operation the caller attempted.
        action: &'static str,
    },

    /// The caller asked about a user id other than their own.
    #[error("caller {caller} may not query assignments of {requested}")]
    CallerMismatch {
        /// Authenticated caller.
        caller: UserId,
        /// User id the caller asked about.
        requested: UserId,
    },

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Maps the failure onto the shared error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AdminRequired { .. } | Self::CallerMismatch { .. } => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Domain(_) => ErrorKind::InvalidArgument,
            Self::Repository(_) => ErrorKind::DependencyUnavailable,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The only component permitted to mutate task documents. History entries
/// are appended before the updated document is saved, with old values
/// captured at merge time inside the domain.
#[derive(Clone)]
pub struct TaskLifecycleService<R, H, C>
where
    R: TaskRepository,
    H: TaskHistoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    history: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> TaskLifecycleService<R, H, C>
where
    R: TaskRepository,
    H: TaskHistoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, history: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            history,
            clock,
        }
    }

    /// Creates a task from a draft. Admin only.
    ///
    /// The created task is `Assigned` whether or not assignment targets
    /// were given; open-to-all tasks are submittable immediately.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AdminRequired`] for non-admin callers,
    /// a domain error for invalid drafts, or a repository error when
    /// persistence fails.
    pub async fn create_task(
        &self,
        draft: TaskDraft,
        caller: &CallerContext,
    ) -> TaskLifecycleResult<Task> {
        if !caller.profile().is_admin() {
            return Err(TaskLifecycleError::AdminRequired {
                action: "create tasks",
            });
        }
        let task = Task::create(draft, &*self.clock)?;
        self.repository.save(&task).await?;
        tracing::info!(task_id = %task.id(), creator = %caller.user_id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent.
    pub async fn get_task(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(id))
    }

    /// Pages the tasks visible to the caller.
    ///
    /// Admins see every task, optionally narrowed by status. Members see
    /// tasks assigned to them or open to all, narrowed to assigned/done
    /// unless the filter narrows further. The returned total count is
    /// computed over the same filter, unbounded by the page window.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn list_visible_tasks(
        &self,
        caller: &CallerContext,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskLifecycleResult<Page<Task>> {
        let result = if caller.profile().is_admin() {
            self.repository.list(status, page).await?
        } else {
            self.repository
                .list_visible_to(caller.user_id(), status, page)
                .await?
        };
        Ok(result)
    }

    /// Pages the tasks explicitly assigned to a user.
    ///
    /// A caller may only query their own assignments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::CallerMismatch`] when `user_id` is
    /// not the caller's own id.
    pub async fn assigned_tasks(
        &self,
        caller: &CallerContext,
        user_id: &UserId,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> TaskLifecycleResult<Page<Task>> {
        if caller.user_id() != user_id {
            return Err(TaskLifecycleError::CallerMismatch {
                caller: caller.user_id().clone(),
                requested: user_id.clone(),
            });
        }
        Ok(self
            .repository
            .list_assigned_to(user_id, status, page)
            .await?)
    }

    /// Appends a user to a task's assignment set. Admin only.
    ///
    /// Idempotent: assigning an already-assigned user changes nothing and
    /// writes no history entry. Otherwise the status is forced to
    /// `Assigned` and exactly one `assigned_user_ids` history entry is
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::AdminRequired`] for non-admin callers
    /// or [`TaskLifecycleError::NotFound`] when the task is absent.
    pub async fn assign_user(
        &self,
        caller: &CallerContext,
        user_id: UserId,
        task_id: TaskId,
    ) -> TaskLifecycleResult<Task> {
        if !caller.profile().is_admin() {
            return Err(TaskLifecycleError::AdminRequired {
                action: "assign tasks",
            });
        }
        let mut task = self.get_task(task_id).await?;
        if let Some(entry) = task.assign_user(user_id.clone(), &*self.clock) {
            self.history.append(&entry).await?;
            self.repository.save(&task).await?;
            tracing::info!(task_id = %task_id, user_id = %user_id, "user assigned to task");
        }
        Ok(task)
    }

    /// Merges a patch into a task, recording one history entry per
    /// changed field.
    ///
    /// Entries are appended before the updated document is saved; the
    /// document itself is saved once after all field merges.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent or
    /// a repository error when persistence fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        patch: TaskPatch,
        editor: &CallerContext,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;
        let entries = task.apply_patch(patch, &*self.clock);
        for entry in &entries {
            self.history.append(entry).await?;
        }
        self.repository.save(&task).await?;
        tracing::info!(
            task_id = %id,
            editor = %editor.user_id(),
            changed_fields = entries.len(),
            "task updated"
        );
        Ok(task)
    }

    /// Marks a task done, recording the completing caller on first
    /// completion.
    ///
    /// Unconditional and idempotent: completing an already-done task
    /// succeeds without change, which is what makes the accept-submission
    /// saga safely retryable.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent.
    pub async fn complete_task(
        &self,
        id: TaskId,
        caller: &CallerContext,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.get_task(id).await?;
        task.complete(Some(caller.user_id().clone()));
        self.repository.save(&task).await?;
        tracing::info!(task_id = %id, completed_by = %caller.user_id(), "task completed");
        Ok(task)
    }

    /// Deletes a task. Its history entries are retained.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskLifecycleError::NotFound(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Returns a task's history entries in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is absent.
    pub async fn task_history(&self, task_id: TaskId) -> TaskLifecycleResult<Vec<TaskHistoryEntry>> {
        self.get_task(task_id).await?;
        Ok(self.history.for_task(task_id).await?)
    }
}
