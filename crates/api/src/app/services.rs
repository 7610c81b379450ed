//! Administration operations over the identity store.
//!
//! Handlers stay thin: validation and store access live here.

use std::collections::BTreeMap;
use std::sync::Arc;

use gatehouse_auth::{
    DomainError, DomainResult, Identity, IdentityStore, PermissionSet, Role, RoleBinding,
};

use super::dto::{BindingDto, RoleDto, UserRoleDto};

pub struct AdminServices {
    store: Arc<dyn IdentityStore>,
}

impl AdminServices {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    pub fn users_list(&self) -> Vec<UserRoleDto> {
        self.store
            .list_identities()
            .into_iter()
            .map(UserRoleDto::from)
            .collect()
    }

    pub fn users_get(&self, identity: &str) -> Option<UserRoleDto> {
        let role = self.store.lookup_role(identity)?;
        Some(UserRoleDto::from(RoleBinding::new(identity, role)))
    }

    pub fn assign_role(&self, user: String, role: String) -> DomainResult<BindingDto> {
        if user.is_empty() {
            return Err(DomainError::validation("user is required"));
        }
        if role.trim().is_empty() {
            return Err(DomainError::validation("role is required"));
        }

        self.store
            .assign_role(Identity::from(user.clone()), Role::new(role.clone()));
        Ok(BindingDto { user, role })
    }

    pub fn define_role(
        &self,
        name: String,
        permissions: &serde_json::Value,
    ) -> DomainResult<RoleDto> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("role name is required"));
        }
        let permissions = PermissionSet::from_json(permissions)?;

        let role = Role::new(name);
        let dto = RoleDto::new(&role, &permissions);
        self.store.define_role_permissions(role, permissions);
        Ok(dto)
    }

    /// Permissions for one role; an undefined role lists none.
    pub fn role_get(&self, name: &str) -> RoleDto {
        let permissions = self.store.lookup_permissions(name);
        RoleDto {
            role: name.to_owned(),
            permissions: permissions.names(),
        }
    }

    pub fn permissions_by_role(&self) -> BTreeMap<String, Vec<String>> {
        self.store
            .list_roles()
            .into_iter()
            .map(|(role, perms)| (role.to_string(), perms.names()))
            .collect()
    }
}
