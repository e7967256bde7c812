//! Adapter implementations of the submission ports.

pub mod local;
pub mod memory;
