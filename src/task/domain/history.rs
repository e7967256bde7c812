//! Append-only audit record of task field changes.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Canonical field names recorded in history entries.
pub mod field {
    /// Task title.
    pub const TITLE: &str = "title";
    /// Task image reference.
    pub const IMAGE: &str = "image";
    /// Task description.
    pub const DESCRIPTION: &str = "description";
    /// Task lifecycle status.
    pub const STATUS: &str = "status";
    /// Task deadline.
    pub const DEADLINE: &str = "deadline";
    /// Assigned user identifier sequence.
    pub const ASSIGNED_USER_IDS: &str = "assigned_user_ids";
}

/// Unique identifier for a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntryId(Uuid);

impl HistoryEntryId {
    /// Creates a new random history entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for HistoryEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HistoryEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable record of one field change on one task.
///
/// Entries are never updated or deleted, and survive deletion of the task
/// they reference: history is an audit trail, not a live join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    field_changed: String,
    old_value: String,
    new_value: String,
    changed_at: DateTime<Utc>,
}

impl TaskHistoryEntry {
    /// Records a field change with old and new values already stringified.
    ///
    /// The old value must be captured before the in-memory field is
    /// mutated; callers uphold that ordering.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        field_changed: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            field_changed: field_changed.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            changed_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the referenced task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the name of the changed field.
    #[must_use]
    pub fn field_changed(&self) -> &str {
        &self.field_changed
    }

    /// Returns the stringified pre-change value.
    #[must_use]
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Returns the stringified post-change value.
    #[must_use]
    pub fn new_value(&self) -> &str {
        &self.new_value
    }

    /// Returns the change timestamp.
    #[must_use]
    pub const fn changed_at(&self) -> DateTime<Utc> {
        self.changed_at
    }
}
