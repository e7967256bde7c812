//! Port contracts for caller identity resolution.

mod directory;

pub use directory::{DirectoryError, DirectoryResult, IdentityDirectory};
