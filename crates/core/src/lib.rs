//! `gatehouse-core` — shared domain primitives.
//!
//! This crate contains **pure domain** types (no HTTP, no storage).

pub mod error;
pub mod identity;

pub use error::{DomainError, DomainResult};
pub use identity::Identity;
