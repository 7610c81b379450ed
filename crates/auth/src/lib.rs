//! `gatehouse-auth` — role-based authorization core.
//!
//! This crate is intentionally decoupled from HTTP. It owns the identity
//! store, the authorization engine, and the policy snapshot format.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod snapshot;
pub mod store;

pub use authorize::{AuthorizationEngine, Decision, DenialKind};
pub use gatehouse_core::{DomainError, DomainResult, Identity};
pub use permissions::{Permission, PermissionSet};
pub use roles::{Role, RoleBinding};
pub use snapshot::PolicySnapshot;
pub use store::{IdentityStore, InMemoryIdentityStore};
