//! Policy snapshot: a JSON image of an identity store.
//!
//! Used to bootstrap a server (the first administrator has to come from
//! somewhere) and by the admin CLI. Reading and writing files is left to the
//! caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gatehouse_core::{DomainError, DomainResult};

use crate::{IdentityStore, PermissionSet, Role, RoleBinding};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicySnapshot {
    /// Bindings in first-assignment order.
    #[serde(default)]
    pub bindings: Vec<RoleBinding>,

    #[serde(default)]
    pub roles: BTreeMap<Role, PermissionSet>,
}

/// Document shape before permission lists are validated.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSnapshot {
    #[serde(default)]
    bindings: Vec<RoleBinding>,

    #[serde(default)]
    roles: BTreeMap<Role, serde_json::Value>,
}

impl PolicySnapshot {
    /// Copy the current contents of `store`.
    pub fn capture<S>(store: &S) -> Self
    where
        S: IdentityStore + ?Sized,
    {
        Self {
            bindings: store.list_identities(),
            roles: store.list_roles().into_iter().collect(),
        }
    }

    /// Replay this snapshot into `store` (role definitions first, then bindings).
    ///
    /// A later binding for the same identity overwrites an earlier one.
    pub fn apply_to<S>(&self, store: &S)
    where
        S: IdentityStore + ?Sized,
    {
        for (role, perms) in &self.roles {
            store.define_role_permissions(role.clone(), perms.clone());
        }
        for binding in &self.bindings {
            store.assign_role(binding.identity.clone(), binding.role.clone());
        }
    }

    /// Parse a snapshot document.
    ///
    /// A broken document shape is `Validation`; a malformed permission list
    /// under `roles` is `InvalidPermissionSet`.
    pub fn from_json_str(raw: &str) -> DomainResult<Self> {
        let raw: RawSnapshot = serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("policy snapshot: {e}")))?;

        let mut roles = BTreeMap::new();
        for (role, value) in raw.roles {
            let perms = PermissionSet::from_json(&value).map_err(|err| match err {
                DomainError::InvalidPermissionSet(msg) => {
                    DomainError::invalid_permission_set(format!("role '{role}': {msg}"))
                }
                other => other,
            })?;
            roles.insert(role, perms);
        }

        Ok(Self {
            bindings: raw.bindings,
            roles,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn assign_role(&mut self, binding: RoleBinding) {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.identity == binding.identity)
        {
            Some(existing) => existing.role = binding.role,
            None => self.bindings.push(binding),
        }
    }

    pub fn define_role_permissions(&mut self, role: Role, permissions: PermissionSet) {
        self.roles.insert(role, permissions);
    }
}
