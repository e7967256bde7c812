//! Identity service surface: token issuance, verification, and caller
//! profile resolution.
//!
//! Every other module authenticates callers through this one. Tokens are
//! self-contained signed claims, so verification is a pure local check;
//! profile resolution happens once per service hop with no shared cache.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The signing codec in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
