//! Port contracts for task persistence and history.

mod repository;

pub use repository::{
    TaskHistoryRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
