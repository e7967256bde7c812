//! Submission aggregate and its review status.

use super::ParseSubmissionStatusError;
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a submission record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random submission identifier.
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

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a submission.
///
/// Starts at `Pending`. Re-decision (accepted → rejected → accepted) is
/// deliberately not guarded: a decision is a reviewer correction surface,
/// not a one-shot transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Awaiting a review decision.
    Pending,
    /// Accepted; triggers completion of the parent task.
    Accepted,
    /// Rejected.
    Rejected,
}

impl SubmissionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl TryFrom<&str> for SubmissionStatus {
    type Error = ParseSubmissionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseSubmissionStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's claim of completion for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    task_id: TaskId,
    user_id: UserId,
    github_link: String,
    status: SubmissionStatus,
    submission_time: DateTime<Utc>,
}

impl Submission {
    /// Creates a pending submission stamped with the current time.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        github_link: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            task_id,
            user_id,
            github_link: github_link.into(),
            status: SubmissionStatus::Pending,
            submission_time: clock.utc(),
        }
    }

    /// Returns the submission identifier.
    #[must_use]
    pub const fn id(&self) -> SubmissionId {
        self.id
    }

    /// Returns the referenced task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the submitting user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the proof-of-work locator.
    #[must_use]
    pub fn github_link(&self) -> &str {
        &self.github_link
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submission_time(&self) -> DateTime<Utc> {
        self.submission_time
    }

    /// Applies a review decision.
    pub const fn decide(&mut self, status: SubmissionStatus) {
        self.status = status;
    }
}
