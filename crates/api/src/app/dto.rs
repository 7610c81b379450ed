//! Request/response bodies for the administration routes.

use serde::{Deserialize, Serialize};

use gatehouse_auth::{PermissionSet, Role, RoleBinding};

/// One row of the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRoleDto {
    pub email: String,
    pub role: String,
}

impl From<RoleBinding> for UserRoleDto {
    fn from(binding: RoleBinding) -> Self {
        Self {
            email: binding.identity.to_string(),
            role: binding.role.to_string(),
        }
    }
}

/// `POST /api/bindings`
///
/// Missing fields deserialize as empty and are rejected by validation, so the
/// caller gets one consistent error shape.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingDto {
    pub user: String,
    pub role: String,
}

/// `POST /api/roles`
///
/// `permissions` stays untyped here so that a wrong shape is reported as an
/// invalid permission set instead of a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct DefineRoleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDto {
    pub role: String,
    pub permissions: Vec<String>,
}

impl RoleDto {
    pub fn new(role: &Role, permissions: &PermissionSet) -> Self {
        Self {
            role: role.to_string(),
            permissions: permissions.names(),
        }
    }
}
