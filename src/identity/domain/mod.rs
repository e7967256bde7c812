//! Domain model for caller identity.

mod error;
mod profile;

pub use error::ParseRoleError;
pub use profile::{Role, UserId, UserProfile};
