//! Application services for submission lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    SubmissionLifecycleError, SubmissionLifecycleResult, SubmissionLifecycleService,
};
