use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

use gatehouse_core::Identity;

/// Role label used for RBAC.
///
/// A role has no lifecycle of its own: it exists once an identity is bound to
/// it or a permission set is defined for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Role {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `identity -> role` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    pub identity: Identity,
    pub role: Role,
}

impl RoleBinding {
    pub fn new(identity: impl Into<Identity>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            role,
        }
    }
}
