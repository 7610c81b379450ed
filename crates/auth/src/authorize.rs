use std::sync::Arc;

use serde::Serialize;

use crate::{IdentityStore, Permission};

/// Outcome of one authorization check.
///
/// Denials are values, not errors: every variant is cheap to produce, log, and
/// test, and callers must handle each one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    /// The request carried no identity (absent or empty).
    DeniedNoIdentity,
    /// The identity has no role binding.
    DeniedUnknownIdentity,
    /// The bound role does not grant the required permission.
    DeniedInsufficientPermission,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The denial kind, or `None` when allowed.
    pub fn denial(self) -> Option<DenialKind> {
        match self {
            Self::Allowed => None,
            Self::DeniedNoIdentity => Some(DenialKind::NoIdentity),
            Self::DeniedUnknownIdentity => Some(DenialKind::UnknownIdentity),
            Self::DeniedInsufficientPermission => Some(DenialKind::InsufficientPermission),
        }
    }
}

/// Caller-facing denial cause.
///
/// Carries no role or permission detail; `message()` is fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoIdentity,
    UnknownIdentity,
    InsufficientPermission,
}

impl DenialKind {
    pub fn code(self) -> &'static str {
        match self {
            Self::NoIdentity => "no_identity",
            Self::UnknownIdentity => "unknown_identity",
            Self::InsufficientPermission => "insufficient_permission",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::NoIdentity => "unauthorized: no user context",
            Self::UnknownIdentity => "unauthorized: unknown user",
            Self::InsufficientPermission => "forbidden: insufficient permissions",
        }
    }
}

/// Flat, fail-closed RBAC check over an [`IdentityStore`].
///
/// - No IO
/// - No panics
/// - No state besides the store handle; never writes through it
#[derive(Clone)]
pub struct AuthorizationEngine {
    store: Arc<dyn IdentityStore>,
}

impl AuthorizationEngine {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// Decide whether `identity` holds `required`.
    ///
    /// Only the exact role bound to the identity is consulted; permission
    /// names are compared byte for byte.
    pub fn authorize(&self, identity: &str, required: &Permission) -> Decision {
        let decision = self.decide(identity, required);

        match decision.denial() {
            None => tracing::debug!(identity, permission = %required, "access allowed"),
            Some(kind) => tracing::info!(
                identity,
                permission = %required,
                denial = kind.code(),
                "access denied"
            ),
        }

        decision
    }

    fn decide(&self, identity: &str, required: &Permission) -> Decision {
        if identity.is_empty() {
            return Decision::DeniedNoIdentity;
        }

        let Some(role) = self.store.lookup_role(identity) else {
            return Decision::DeniedUnknownIdentity;
        };

        if self
            .store
            .lookup_permissions(role.as_str())
            .contains(required.as_str())
        {
            Decision::Allowed
        } else {
            Decision::DeniedInsufficientPermission
        }
    }
}

impl core::fmt::Debug for AuthorizationEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthorizationEngine").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryIdentityStore, PermissionSet, Role};
    use proptest::prelude::*;

    fn engine_with(store: &Arc<InMemoryIdentityStore>) -> AuthorizationEngine {
        AuthorizationEngine::new(store.clone())
    }

    fn perms(names: &[&str]) -> PermissionSet {
        PermissionSet::try_from_names(names.iter().copied()).unwrap()
    }

    #[test]
    fn admin_scenario() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.assign_role("alice@x.com".into(), Role::new("admin"));
        store.define_role_permissions(Role::new("admin"), perms(&["view_users", "create_role"]));
        let engine = engine_with(&store);

        assert_eq!(
            engine.authorize("alice@x.com", &Permission::new("view_users")),
            Decision::Allowed
        );
        assert_eq!(
            engine.authorize("alice@x.com", &Permission::new("delete_role")),
            Decision::DeniedInsufficientPermission
        );
    }

    #[test]
    fn unbound_identity_is_unknown() {
        let store = Arc::new(InMemoryIdentityStore::new());
        let engine = engine_with(&store);

        assert_eq!(
            engine.authorize("bob@x.com", &Permission::new("view_users")),
            Decision::DeniedUnknownIdentity
        );
    }

    #[test]
    fn role_defined_with_empty_set_grants_nothing() {
        let store = Arc::new(InMemoryIdentityStore::new());
        let empty = PermissionSet::from_json(&serde_json::json!([])).unwrap();
        store.define_role_permissions(Role::new("viewer"), empty);
        store.assign_role("carol@x.com".into(), Role::new("viewer"));
        let engine = engine_with(&store);

        assert_eq!(
            engine.authorize("carol@x.com", &Permission::new("view_users")),
            Decision::DeniedInsufficientPermission
        );
    }

    #[test]
    fn role_without_definition_fails_closed() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.assign_role("dave@x.com".into(), Role::new("undefined"));
        let engine = engine_with(&store);

        for p in ["view_users", "create_role", "*", ""] {
            assert!(!engine.authorize("dave@x.com", &Permission::new(p)).is_allowed());
        }
    }

    #[test]
    fn empty_identity_is_no_identity() {
        let store = Arc::new(InMemoryIdentityStore::new());
        // Even an explicit binding for "" does not make the empty identity valid.
        store.assign_role("".into(), Role::new("admin"));
        store.define_role_permissions(Role::new("admin"), perms(&["view_users"]));
        let engine = engine_with(&store);

        assert_eq!(
            engine.authorize("", &Permission::new("view_users")),
            Decision::DeniedNoIdentity
        );
    }

    #[test]
    fn no_wildcard_or_prefix_matching() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.assign_role("erin".into(), Role::new("root"));
        store.define_role_permissions(Role::new("root"), perms(&["*", "view"]));
        let engine = engine_with(&store);

        assert_eq!(
            engine.authorize("erin", &Permission::new("view_users")),
            Decision::DeniedInsufficientPermission
        );
        assert_eq!(
            engine.authorize("erin", &Permission::new("VIEW")),
            Decision::DeniedInsufficientPermission
        );
        assert_eq!(engine.authorize("erin", &Permission::new("view")), Decision::Allowed);
    }

    #[test]
    fn decision_tracks_store_updates() {
        let store = Arc::new(InMemoryIdentityStore::new());
        store.assign_role("frank".into(), Role::new("viewer"));
        let engine = engine_with(&store);
        let p = Permission::new("view_users");

        assert_eq!(engine.authorize("frank", &p), Decision::DeniedInsufficientPermission);
        store.define_role_permissions(Role::new("viewer"), perms(&["view_users"]));
        assert_eq!(engine.authorize("frank", &p), Decision::Allowed);
        store.define_role_permissions(Role::new("viewer"), perms(&["other"]));
        assert_eq!(engine.authorize("frank", &p), Decision::DeniedInsufficientPermission);
    }

    #[test]
    fn denial_serialization_names_only_the_kind() {
        let json = serde_json::to_value(Decision::DeniedInsufficientPermission.denial()).unwrap();
        assert_eq!(json, serde_json::json!("insufficient_permission"));
        assert_eq!(Decision::Allowed.denial(), None);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthorizationEngine>();
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Allowed exactly when the required name is in the bound role's set.
        #[test]
        fn allowed_iff_permission_in_role_set(
            granted in prop::collection::btree_set("[a-zA-Z_]{1,8}", 0..6),
            required in "[a-zA-Z_]{1,8}",
        ) {
            let store = Arc::new(InMemoryIdentityStore::new());
            store.assign_role("user".into(), Role::new("r"));
            store.define_role_permissions(
                Role::new("r"),
                PermissionSet::try_from_names(granted.iter().cloned()).unwrap(),
            );
            let engine = engine_with(&store);

            let decision = engine.authorize("user", &Permission::new(required.clone()));
            if granted.contains(&required) {
                prop_assert_eq!(decision, Decision::Allowed);
            } else {
                prop_assert_eq!(decision, Decision::DeniedInsufficientPermission);
            }
        }

        /// The last assignment wins, whatever came before.
        #[test]
        fn last_assignment_wins(roles in prop::collection::vec("[a-z]{1,6}", 1..8)) {
            let store = InMemoryIdentityStore::new();
            for role in &roles {
                store.assign_role("user".into(), Role::new(role.clone()));
            }
            let last = roles.last().cloned().map(Role::new);
            prop_assert_eq!(store.lookup_role("user"), last);
            prop_assert_eq!(store.list_identities().len(), 1);
        }

        /// The last definition wins; earlier sets never leak into it.
        #[test]
        fn last_definition_wins(
            sets in prop::collection::vec(prop::collection::btree_set("[a-z]{1,6}", 0..5), 1..6)
        ) {
            let store = InMemoryIdentityStore::new();
            for set in &sets {
                store.define_role_permissions(
                    Role::new("r"),
                    PermissionSet::try_from_names(set.iter().cloned()).unwrap(),
                );
            }
            let expected: Vec<String> = sets.last().unwrap().iter().cloned().collect();
            prop_assert_eq!(store.lookup_permissions("r").names(), expected);
        }
    }
}
