//! Caller authentication surface shared by every service boundary.
//!
//! Each inbound call carries an opaque bearer credential in an
//! `Authorization`-style header field. The gateway contract is the same at
//! every hop: parse the header, resolve the token to a profile through the
//! identity directory, and thread the resolved caller through the lifecycle
//! operation as an explicit [`CallerContext`] value. The raw token rides
//! along in the context so outbound calls can forward it unchanged.

mod bearer;
mod context;
mod error;

pub use bearer::{BearerParseError, BearerToken};
pub use context::{AuthenticateError, CallerContext, authenticate};
pub use error::ErrorKind;
