//! Domain model for the task lifecycle.
//!
//! Models task creation, assignment, patch-style updates, and the
//! field-change audit trail while keeping infrastructure concerns outside
//! the domain boundary.

mod error;
mod history;
mod ids;
mod patch;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use history::{HistoryEntryId, TaskHistoryEntry, field};
pub use ids::TaskId;
pub use patch::TaskPatch;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskStatus};
