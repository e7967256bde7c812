//! Service layer for submitting, reviewing, and commenting on submissions.
//!
//! Accepting a submission is an explicit two-step saga: the local decision
//! is persisted first, then the remote task completion is issued. A remote
//! failure after the local commit is surfaced as a partial-failure error
//! carrying the already-persisted submission; the decision is never rolled
//! back, and the retry path is the idempotent remote completion.

use crate::access::{CallerContext, ErrorKind};
use crate::identity::domain::UserId;
use crate::page::{Page, PageRequest};
use crate::submission::{
    domain::{
        ParseSubmissionStatusError, Submission, SubmissionComment, SubmissionId, SubmissionStatus,
    },
    ports::{
        SubmissionCommentRepository, SubmissionRepository, SubmissionRepositoryError,
        TaskClientError, TaskServiceClient,
    },
};
use crate::task::domain::{Task, TaskId, TaskStatus};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for submission lifecycle operations.
#[derive(Debug, Error)]
pub enum SubmissionLifecycleError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced task is not open for submissions.
    #[error("task {task_id} is not open for submissions, current status: {status}")]
    TaskNotOpen {
        /// Referenced task.
        task_id: TaskId,
        /// Its current status.
        status: &'static str,
    },

    /// The task has assignment targets and the caller is not among them.
    #[error("task {task_id} is not assigned to user {user_id}")]
    NotAssigned {
        /// Referenced task.
        task_id: TaskId,
        /// Excluded caller.
        user_id: UserId,
    },

    /// The referenced submission does not exist.
    #[error("submission not found: {0}")]
    NotFound(SubmissionId),

    /// The review decision string is outside the status domain.
    #[error(transparent)]
    InvalidDecision(#[from] ParseSubmissionStatusError),

    /// A task service call failed before any local state change.
    #[error(transparent)]
    TaskService(TaskClientError),

    /// The remote task completion failed after the local decision had
    /// already been persisted.
    ///
    /// Callers must treat this as a partial-failure state: the submission
    /// is accepted, the task is not yet done, and the missing step is
    /// retried through the idempotent remote completion.
    #[error("submission {} accepted but task completion failed: {source}", submission.id())]
    CompletionFailed {
        /// The decision as persisted locally.
        submission: Box<Submission>,
        /// The remote failure.
        source: TaskClientError,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SubmissionRepositoryError),
}

impl SubmissionLifecycleError {
    /// Maps the failure onto the shared error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) | Self::NotFound(_) => ErrorKind::NotFound,
            Self::TaskNotOpen { .. } => ErrorKind::InvalidState,
            Self::NotAssigned { .. } => ErrorKind::Forbidden,
            Self::InvalidDecision(_) => ErrorKind::InvalidArgument,
            Self::TaskService(err) => err.kind(),
            Self::CompletionFailed { .. } => ErrorKind::DependencyFailure,
            Self::Repository(_) => ErrorKind::DependencyUnavailable,
        }
    }
}

/// Result type for submission lifecycle service operations.
pub type SubmissionLifecycleResult<T> = Result<T, SubmissionLifecycleError>;

/// Submission lifecycle orchestration service.
#[derive(Clone)]
pub struct SubmissionLifecycleService<S, M, T, C>
where
    S: SubmissionRepository,
    M: SubmissionCommentRepository,
    T: TaskServiceClient,
    C: Clock + Send + Sync,
{
    submissions: Arc<S>,
    comments: Arc<M>,
    task_client: Arc<T>,
    clock: Arc<C>,
}

impl<S, M, T, C> SubmissionLifecycleService<S, M, T, C>
where
    S: SubmissionRepository,
    M: SubmissionCommentRepository,
    T: TaskServiceClient,
    C: Clock + Send + Sync,
{
    /// Creates a new submission lifecycle service.
    #[must_use]
    pub const fn new(
        submissions: Arc<S>,
        comments: Arc<M>,
        task_client: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            submissions,
            comments,
            task_client,
            clock,
        }
    }

    /// Submits proof of completion against a task.
    ///
    /// Fetches the task through the remote client (forwarding the caller's
    /// token), then validates eligibility: the task must be `Assigned`,
    /// and the caller must be among its assignment targets unless the task
    /// is open to all.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionLifecycleError::TaskNotFound`],
    /// [`SubmissionLifecycleError::TaskNotOpen`], or
    /// [`SubmissionLifecycleError::NotAssigned`] when eligibility fails,
    /// or a task-service error when the remote fetch fails.
    pub async fn submit_task(
        &self,
        task_id: TaskId,
        github_link: impl Into<String> + Send,
        caller: &CallerContext,
    ) -> SubmissionLifecycleResult<Submission> {
        let task = self.fetch_task(task_id, caller).await?;

        if task.status() != TaskStatus::Assigned {
            return Err(SubmissionLifecycleError::TaskNotOpen {
                task_id,
                status: task.status().as_str(),
            });
        }
        if !task.is_visible_to(caller.user_id()) {
            return Err(SubmissionLifecycleError::NotAssigned {
                task_id,
                user_id: caller.user_id().clone(),
            });
        }

        let submission = Submission::new(
            task_id,
            caller.user_id().clone(),
            github_link,
            &*self.clock,
        );
        self.submissions.save(&submission).await?;
        tracing::info!(
            submission_id = %submission.id(),
            task_id = %task_id,
            user_id = %caller.user_id(),
            "submission created"
        );
        Ok(submission)
    }

    /// Retrieves a submission by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionLifecycleError::NotFound`] when absent.
    pub async fn get_submission(&self, id: SubmissionId) -> SubmissionLifecycleResult<Submission> {
        self.submissions
            .find_by_id(id)
            .await?
            .ok_or(SubmissionLifecycleError::NotFound(id))
    }

    /// Pages all submissions.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn list_submissions(
        &self,
        page: PageRequest,
    ) -> SubmissionLifecycleResult<Page<Submission>> {
        Ok(self.submissions.list(page).await?)
    }

    /// Pages submissions referencing one task.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn list_by_task(
        &self,
        task_id: TaskId,
        page: PageRequest,
    ) -> SubmissionLifecycleResult<Page<Submission>> {
        Ok(self.submissions.list_by_task(task_id, page).await?)
    }

    /// Applies a review decision given in wire form.
    ///
    /// The decision string is parsed against the full status domain before
    /// anything is touched; a bogus string leaves the submission
    /// unchanged. The decision is persisted locally first; when it is an
    /// acceptance, the remote task completion follows, and its failure
    /// surfaces as [`SubmissionLifecycleError::CompletionFailed`] without
    /// unwinding the local write.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionLifecycleError::NotFound`],
    /// [`SubmissionLifecycleError::InvalidDecision`], or
    /// [`SubmissionLifecycleError::CompletionFailed`].
    pub async fn decide_submission(
        &self,
        id: SubmissionId,
        decision: &str,
        caller: &CallerContext,
    ) -> SubmissionLifecycleResult<Submission> {
        let mut submission = self.get_submission(id).await?;
        let status = SubmissionStatus::try_from(decision)?;

        submission.decide(status);
        self.submissions.save(&submission).await?;
        tracing::info!(
            submission_id = %id,
            decision = %status,
            reviewer = %caller.user_id(),
            "submission decided"
        );

        if status == SubmissionStatus::Accepted
            && let Err(source) = self
                .task_client
                .complete_task(submission.task_id(), caller.token())
                .await
        {
            tracing::warn!(
                submission_id = %id,
                task_id = %submission.task_id(),
                error = %source,
                "submission accepted but task completion failed; retry completion"
            );
            return Err(SubmissionLifecycleError::CompletionFailed {
                submission: Box::new(submission),
                source,
            });
        }

        Ok(submission)
    }

    /// Adds a review comment attributed to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionLifecycleError::NotFound`] when the submission
    /// is absent.
    pub async fn add_comment(
        &self,
        submission_id: SubmissionId,
        text: impl Into<String> + Send,
        caller: &CallerContext,
    ) -> SubmissionLifecycleResult<SubmissionComment> {
        self.get_submission(submission_id).await?;
        let comment = SubmissionComment::new(
            submission_id,
            caller.user_id().clone(),
            text,
            &*self.clock,
        );
        self.comments.append(&comment).await?;
        Ok(comment)
    }

    /// Returns a submission's comments in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionLifecycleError::NotFound`] when the submission
    /// is absent.
    pub async fn comments(
        &self,
        submission_id: SubmissionId,
    ) -> SubmissionLifecycleResult<Vec<SubmissionComment>> {
        self.get_submission(submission_id).await?;
        Ok(self.comments.for_submission(submission_id).await?)
    }

    /// Fetches a task remotely, mapping a remote not-found onto the local
    /// error vocabulary.
    async fn fetch_task(
        &self,
        task_id: TaskId,
        caller: &CallerContext,
    ) -> SubmissionLifecycleResult<Task> {
        self.task_client
            .get_task(task_id, caller.token())
            .await
            .map_err(|err| match &err {
                TaskClientError::Remote {
                    kind: ErrorKind::NotFound,
                    ..
                } => SubmissionLifecycleError::TaskNotFound(task_id),
                _ => SubmissionLifecycleError::TaskService(err),
            })
    }
}
