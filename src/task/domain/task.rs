//! Task aggregate root and its lifecycle rules.

use super::{ParseTaskStatusError, TaskDomainError, TaskHistoryEntry, TaskId, TaskPatch, field};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Placeholder recorded in history when an optional value is absent.
const ABSENT_VALUE: &str = "none";

/// Task lifecycle status.
///
/// Transitions are monotonic in the order `Pending` → `Assigned` → `Done`,
/// and `Done` is terminal. Creation forces `Assigned` for both pre-assigned
/// and open-to-all tasks, so `Pending` is unreachable through the public
/// surface; it remains in the domain for stored data that predates that
/// rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not yet open for submissions.
    Pending,
    /// Open for submissions from assigned users, or everyone when the
    /// assignment set is empty.
    Assigned,
    /// Completed; terminal.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Caller-supplied fields for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    image: Option<String>,
    tags: Vec<String>,
    assigned_user_ids: Vec<UserId>,
    deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            image: None,
            tags: Vec::new(),
            assigned_user_ids: Vec::new(),
            deadline: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Sets the tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the assignment targets. An empty sequence means open to all.
    #[must_use]
    pub fn with_assigned_user_ids(mut self, ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_user_ids = ids.into_iter().collect();
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    image: Option<String>,
    tags: Vec<String>,
    assigned_user_ids: Vec<UserId>,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    completed_by_user_id: Option<UserId>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted image reference, if any.
    pub image: Option<String>,
    /// Persisted tag set.
    pub tags: Vec<String>,
    /// Persisted assignment targets.
    pub assigned_user_ids: Vec<UserId>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completing user, if any.
    pub completed_by_user_id: Option<UserId>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// Status is forced to [`TaskStatus::Assigned`] whether or not
    /// assignment targets were given, so open-to-all tasks are submittable
    /// immediately on creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if draft.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            image: draft.image,
            tags: draft.tags,
            assigned_user_ids: draft.assigned_user_ids,
            status: TaskStatus::Assigned,
            deadline: draft.deadline,
            created_at: clock.utc(),
            completed_by_user_id: None,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            image: data.image,
            tags: data.tags,
            assigned_user_ids: data.assigned_user_ids,
            status: data.status,
            deadline: data.deadline,
            created_at: data.created_at,
            completed_by_user_id: data.completed_by_user_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the image reference, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the tag set.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the ordered assignment targets.
    #[must_use]
    pub fn assigned_user_ids(&self) -> &[UserId] {
        &self.assigned_user_ids
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the user recorded as completing the task, if any.
    #[must_use]
    pub const fn completed_by_user_id(&self) -> Option<&UserId> {
        self.completed_by_user_id.as_ref()
    }

    /// True when the assignment set is empty, opening the task to everyone.
    #[must_use]
    pub const fn is_open_to_all(&self) -> bool {
        self.assigned_user_ids.is_empty()
    }

    /// True when the user appears in the assignment set.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assigned_user_ids.contains(user_id)
    }

    /// True when the user may see or submit against this task.
    #[must_use]
    pub fn is_visible_to(&self, user_id: &UserId) -> bool {
        self.is_open_to_all() || self.is_assigned_to(user_id)
    }

    /// Appends a user to the assignment set and forces [`TaskStatus::Assigned`].
    ///
    /// Idempotent: an already-assigned user produces no change and no
    /// history entry.
    pub fn assign_user(&mut self, user_id: UserId, clock: &impl Clock) -> Option<TaskHistoryEntry> {
        if self.is_assigned_to(&user_id) {
            return None;
        }
        let old_value = join_user_ids(&self.assigned_user_ids);
        self.assigned_user_ids.push(user_id);
        self.status = TaskStatus::Assigned;
        Some(TaskHistoryEntry::new(
            self.id,
            field::ASSIGNED_USER_IDS,
            old_value,
            join_user_ids(&self.assigned_user_ids),
            clock,
        ))
    }

    /// Merges a patch field by field, returning one history entry per
    /// present-and-differing field.
    ///
    /// Every entry captures the old value before the field is mutated.
    /// When the patch carries no status and the current status is not
    /// [`TaskStatus::Done`], the status is forced back to
    /// [`TaskStatus::Assigned`]: a task only leaves `Assigned` through an
    /// explicit status change. The forced flip is not itself recorded.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) -> Vec<TaskHistoryEntry> {
        let mut entries = Vec::new();

        if let Some(title) = patch.title
            && title != self.title
        {
            entries.push(TaskHistoryEntry::new(
                self.id,
                field::TITLE,
                self.title.clone(),
                title.clone(),
                clock,
            ));
            self.title = title;
        }
        if let Some(image) = patch.image
            && self.image.as_deref() != Some(image.as_str())
        {
            entries.push(TaskHistoryEntry::new(
                self.id,
                field::IMAGE,
                display_optional(self.image.as_deref()),
                image.clone(),
                clock,
            ));
            self.image = Some(image);
        }
        if let Some(description) = patch.description
            && self.description.as_deref() != Some(description.as_str())
        {
            entries.push(TaskHistoryEntry::new(
                self.id,
                field::DESCRIPTION,
                display_optional(self.description.as_deref()),
                description.clone(),
                clock,
            ));
            self.description = Some(description);
        }
        match patch.status {
            Some(status) if status != self.status => {
                entries.push(TaskHistoryEntry::new(
                    self.id,
                    field::STATUS,
                    self.status.as_str(),
                    status.as_str(),
                    clock,
                ));
                self.status = status;
            }
            Some(_) => {}
            None => {
                if self.status != TaskStatus::Done {
                    self.status = TaskStatus::Assigned;
                }
            }
        }
        if let Some(deadline) = patch.deadline
            && self.deadline != Some(deadline)
        {
            entries.push(TaskHistoryEntry::new(
                self.id,
                field::DEADLINE,
                self.deadline
                    .map_or_else(|| ABSENT_VALUE.to_owned(), |value| value.to_rfc3339()),
                deadline.to_rfc3339(),
                clock,
            ));
            self.deadline = Some(deadline);
        }
        if let Some(assigned) = patch.assigned_user_ids
            && assigned != self.assigned_user_ids
        {
            entries.push(TaskHistoryEntry::new(
                self.id,
                field::ASSIGNED_USER_IDS,
                join_user_ids(&self.assigned_user_ids),
                join_user_ids(&assigned),
                clock,
            ));
            self.assigned_user_ids = assigned;
        }

        entries
    }

    /// Marks the task done.
    ///
    /// Unconditional and idempotent: completing an already-done task leaves
    /// it done and keeps the originally recorded completer.
    pub fn complete(&mut self, completed_by: Option<UserId>) {
        if self.status != TaskStatus::Done {
            self.completed_by_user_id = completed_by;
        }
        self.status = TaskStatus::Done;
    }
}

/// Stringifies an assignment sequence for history entries.
fn join_user_ids(ids: &[UserId]) -> String {
    if ids.is_empty() {
        return ABSENT_VALUE.to_owned();
    }
    ids.iter()
        .map(UserId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Stringifies an optional value for history entries.
fn display_optional(value: Option<&str>) -> String {
    value.unwrap_or(ABSENT_VALUE).to_owned()
}
