//! In-process task service client.
//!
//! Implements the remote boundary against a task lifecycle service living
//! in the same process, for tests and single-process deployments. The hop
//! semantics are preserved exactly: the forwarded token is re-resolved
//! against the identity directory on every call, with no caller-context
//! sharing across the boundary.

use async_trait::async_trait;
use std::sync::Arc;

use crate::access::{BearerToken, CallerContext};
use crate::identity::ports::IdentityDirectory;
use crate::submission::ports::{TaskClientError, TaskClientResult, TaskServiceClient};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskHistoryRepository, TaskRepository},
    services::{TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;

/// Task service client that dispatches in process.
#[derive(Clone)]
pub struct InProcessTaskClient<R, H, C, D>
where
    R: TaskRepository,
    H: TaskHistoryRepository,
    C: Clock + Send + Sync,
    D: IdentityDirectory,
{
    service: Arc<TaskLifecycleService<R, H, C>>,
    directory: Arc<D>,
}

impl<R, H, C, D> InProcessTaskClient<R, H, C, D>
where
    R: TaskRepository,
    H: TaskHistoryRepository,
    C: Clock + Send + Sync,
    D: IdentityDirectory,
{
    /// Creates a client over an in-process task service and the identity
    /// directory used for per-hop token resolution.
    #[must_use]
    pub const fn new(service: Arc<TaskLifecycleService<R, H, C>>, directory: Arc<D>) -> Self {
        Self { service, directory }
    }

    /// Resolves the forwarded token as the receiving hop would.
    async fn resolve_caller(&self, token: &BearerToken) -> TaskClientResult<CallerContext> {
        let profile = self
            .directory
            .resolve_profile(token)
            .await
            .map_err(|err| TaskClientError::Remote {
                kind: err.kind(),
                message: err.to_string(),
            })?;
        Ok(CallerContext::new(profile, token.clone()))
    }
}

fn map_service_error(err: TaskLifecycleError) -> TaskClientError {
    TaskClientError::Remote {
        kind: err.kind(),
        message: err.to_string(),
    }
}

#[async_trait]
impl<R, H, C, D> TaskServiceClient for InProcessTaskClient<R, H, C, D>
where
    R: TaskRepository,
    H: TaskHistoryRepository,
    C: Clock + Send + Sync,
    D: IdentityDirectory,
{
    async fn get_task(&self, task_id: TaskId, token: &BearerToken) -> TaskClientResult<Task> {
        self.resolve_caller(token).await?;
        self.service
            .get_task(task_id)
            .await
            .map_err(map_service_error)
    }

    async fn complete_task(&self, task_id: TaskId, token: &BearerToken) -> TaskClientResult<Task> {
        let caller = self.resolve_caller(token).await?;
        self.service
            .complete_task(task_id, &caller)
            .await
            .map_err(map_service_error)
    }
}
