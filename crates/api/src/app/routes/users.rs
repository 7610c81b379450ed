//! User directory and role assignment.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::{dto::AssignRoleRequest, errors, services::AdminServices};
use crate::context::IdentityContext;

/// GET /api/users - List every identity with its role, in assignment order
pub async fn list_users(
    Extension(services): Extension<Arc<AdminServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.users_list())).into_response()
}

/// GET /api/users/:identity - Role bound to one identity
pub async fn get_user(
    Extension(services): Extension<Arc<AdminServices>>,
    Path(identity): Path<String>,
) -> axum::response::Response {
    match services.users_get(&identity) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

/// POST /api/bindings - Bind a user to a role (replaces any previous role)
pub async fn assign_role(
    Extension(services): Extension<Arc<AdminServices>>,
    Extension(actor): Extension<IdentityContext>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> axum::response::Response {
    let body: AssignRoleRequest = match errors::json_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };
    match services.assign_role(body.user, body.role) {
        Ok(binding) => {
            tracing::info!(
                actor = %actor.identity(),
                user = %binding.user,
                role = %binding.role,
                "role assigned"
            );
            (StatusCode::CREATED, Json(binding)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
