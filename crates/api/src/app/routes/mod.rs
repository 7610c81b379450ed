use axum::{
    Router,
    routing::{get, post},
};

use crate::authz::Gate;

pub mod roles;
pub mod system;
pub mod users;

/// Router for all gated administration endpoints.
///
/// Every route here declares its one required permission at registration.
pub fn router(gate: &Gate) -> Router {
    Router::new()
        .route("/users", gate.protect(get(users::list_users), "view_users"))
        .route("/users/:identity", gate.protect(get(users::get_user), "view_users"))
        .route("/bindings", gate.protect(post(users::assign_role), "assign_role"))
        .route("/roles", gate.protect(post(roles::define_role), "create_role"))
        .route("/roles/:name", gate.protect(get(roles::get_role), "view_permissions"))
        .route(
            "/permissions",
            gate.protect(get(roles::list_permissions), "view_permissions"),
        )
}
