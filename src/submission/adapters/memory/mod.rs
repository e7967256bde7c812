//! In-memory submission adapters.

mod comment;
mod submission;

pub use comment::InMemorySubmissionCommentRepository;
pub use submission::InMemorySubmissionRepository;
