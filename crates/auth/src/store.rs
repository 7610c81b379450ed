//! Identity store: `identity -> role` and `role -> permission set`.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gatehouse_core::Identity;

use crate::{PermissionSet, Role, RoleBinding};

/// Owner of both authorization relations.
///
/// All operations are synchronous, in-memory, and total. Implementations must
/// make every write appear atomic to concurrent readers.
pub trait IdentityStore: Send + Sync {
    /// Bind `identity` to `role`, replacing any previous binding.
    fn assign_role(&self, identity: Identity, role: Role);

    /// Replace the permission set granted by `role` (no merge).
    fn define_role_permissions(&self, role: Role, permissions: PermissionSet);

    fn lookup_role(&self, identity: &str) -> Option<Role>;

    /// Permissions granted by `role`; the empty set when none were defined.
    fn lookup_permissions(&self, role: &str) -> PermissionSet;

    /// Bindings in order of each identity's first assignment.
    fn list_identities(&self) -> Vec<RoleBinding>;

    /// Defined roles, sorted by name.
    fn list_roles(&self) -> Vec<(Role, PermissionSet)>;
}

impl<S> IdentityStore for Arc<S>
where
    S: IdentityStore + ?Sized,
{
    fn assign_role(&self, identity: Identity, role: Role) {
        (**self).assign_role(identity, role)
    }

    fn define_role_permissions(&self, role: Role, permissions: PermissionSet) {
        (**self).define_role_permissions(role, permissions)
    }

    fn lookup_role(&self, identity: &str) -> Option<Role> {
        (**self).lookup_role(identity)
    }

    fn lookup_permissions(&self, role: &str) -> PermissionSet {
        (**self).lookup_permissions(role)
    }

    fn list_identities(&self) -> Vec<RoleBinding> {
        (**self).list_identities()
    }

    fn list_roles(&self) -> Vec<(Role, PermissionSet)> {
        (**self).list_roles()
    }
}

#[derive(Debug, Default)]
struct State {
    /// Insertion-ordered bindings; `index` points into this vector.
    bindings: Vec<RoleBinding>,
    index: HashMap<Identity, usize>,
    roles: BTreeMap<Role, PermissionSet>,
}

/// In-memory identity store.
///
/// One `RwLock` guards both relations: lookups share the lock, writes take it
/// exclusively. A poisoned lock is recovered instead of propagated because
/// every write leaves the state consistent before it can panic.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<State>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn assign_role(&self, identity: Identity, role: Role) {
        let mut state = self.write();
        match state.index.get(identity.as_str()).copied() {
            Some(pos) => {
                tracing::debug!(%identity, %role, "role binding replaced");
                state.bindings[pos].role = role;
            }
            None => {
                tracing::debug!(%identity, %role, "role binding created");
                let pos = state.bindings.len();
                state.index.insert(identity.clone(), pos);
                state.bindings.push(RoleBinding { identity, role });
            }
        }
    }

    fn define_role_permissions(&self, role: Role, permissions: PermissionSet) {
        tracing::debug!(%role, count = permissions.len(), "role permissions replaced");
        self.write().roles.insert(role, permissions);
    }

    fn lookup_role(&self, identity: &str) -> Option<Role> {
        let state = self.read();
        state
            .index
            .get(identity)
            .map(|&pos| state.bindings[pos].role.clone())
    }

    fn lookup_permissions(&self, role: &str) -> PermissionSet {
        self.read().roles.get(role).cloned().unwrap_or_default()
    }

    fn list_identities(&self) -> Vec<RoleBinding> {
        self.read().bindings.clone()
    }

    fn list_roles(&self) -> Vec<(Role, PermissionSet)> {
        self.read()
            .roles
            .iter()
            .map(|(role, perms)| (role.clone(), perms.clone()))
            .collect()
    }
}
