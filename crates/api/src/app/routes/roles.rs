//! Role definitions and the role -> permission listing.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::{dto::DefineRoleRequest, errors, services::AdminServices};
use crate::context::IdentityContext;

/// POST /api/roles - Define (replace) the permission set of a role
pub async fn define_role(
    Extension(services): Extension<Arc<AdminServices>>,
    Extension(actor): Extension<IdentityContext>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> axum::response::Response {
    let body: DefineRoleRequest = match errors::json_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };
    match services.define_role(body.name, &body.permissions) {
        Ok(role) => {
            tracing::info!(
                actor = %actor.identity(),
                role = %role.role,
                count = role.permissions.len(),
                "role permissions defined"
            );
            (StatusCode::CREATED, Json(role)).into_response()
        }
        Err(e) => {
            tracing::debug!(actor = %actor.identity(), error = %e, "role definition rejected");
            errors::domain_error_to_response(e)
        }
    }
}

/// GET /api/roles/:name - Permissions granted by one role
pub async fn get_role(
    Extension(services): Extension<Arc<AdminServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.role_get(&name))).into_response()
}

/// GET /api/permissions - Every defined role with its permissions
pub async fn list_permissions(
    Extension(services): Extension<Arc<AdminServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.permissions_by_role())).into_response()
}
