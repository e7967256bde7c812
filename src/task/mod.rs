//! Task lifecycle management.
//!
//! This module owns the Task aggregate: creation, visibility rules,
//! assignment, field-by-field updates with an append-only history log, and
//! completion. Tasks are mutated only through the lifecycle service;
//! history entries are written with the old value captured before the
//! in-memory field changes. The module follows hexagonal architecture:
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
