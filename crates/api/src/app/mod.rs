//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: administration operations over the identity store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, http::HeaderName, routing::get};
use tower::ServiceBuilder;

use gatehouse_auth::{AuthorizationEngine, IdentityStore};

use crate::authz::Gate;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The store is shared: the gate reads it through the engine, the admin
/// handlers write it through [`services::AdminServices`].
pub fn build_app(store: Arc<dyn IdentityStore>, identity_header: HeaderName) -> Router {
    let engine = AuthorizationEngine::new(Arc::clone(&store));
    let gate = Gate::new(engine, identity_header);
    let services = Arc::new(services::AdminServices::new(store));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router(&gate))
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
