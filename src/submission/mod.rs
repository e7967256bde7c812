//! Submission lifecycle management.
//!
//! This module owns proof-of-completion submissions and their review
//! comments. Submitting validates eligibility against the referenced task
//! through a remote call that forwards the caller's token; accepting a
//! submission triggers the remote, idempotent task completion as the
//! second step of an explicit two-step saga. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
