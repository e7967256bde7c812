//! Taskboard: distributed task assignment and submission review.
//!
//! This crate provides the core functionality for assigning work items to
//! users, accepting proof-of-completion submissions, and reviewing them,
//! with every task field change recorded in an append-only history log.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (stores, remote clients)
//!
//! The identity, task, and submission modules correspond to independently
//! deployable services. There is no shared transaction boundary between
//! them: cross-service consistency rests on idempotent state transitions
//! and explicit partial-failure surfacing, never on rollback.
//!
//! # Modules
//!
//! - [`identity`]: Signed-token codec and caller profile resolution
//! - [`task`]: Task lifecycle, visibility rules, and field-change history
//! - [`submission`]: Submission lifecycle, review decisions, and comments
//! - [`access`]: Bearer-token extraction, caller context, error taxonomy
//! - [`page`]: Shared pagination contract

pub mod access;
pub mod identity;
pub mod page;
pub mod submission;
pub mod task;
