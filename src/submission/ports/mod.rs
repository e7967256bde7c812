//! Port contracts for submission persistence and the remote task service.

mod repository;
mod task_client;

pub use repository::{
    SubmissionCommentRepository, SubmissionRepository, SubmissionRepositoryError,
    SubmissionRepositoryResult,
};
pub use task_client::{TaskClientError, TaskClientResult, TaskServiceClient};
