//! Domain model for submissions and review comments.

mod comment;
mod error;
mod submission;

pub use comment::{CommentId, SubmissionComment};
pub use error::ParseSubmissionStatusError;
pub use submission::{Submission, SubmissionId, SubmissionStatus};
