//! HTTP API: access-control gate, administration routes, and server config.
//!
//! Deployment requirement: the gate trusts the identity header as delivered.
//! Run it behind an authentication stage that strips client-supplied copies of
//! that header and sets it from a verified credential.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
