use gatehouse_auth::{Identity, Permission};

/// Caller context for a request that passed the gate.
///
/// Inserted as a request extension only on `Allowed`; handlers behind the gate
/// can rely on it being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
    granted: Permission,
}

impl IdentityContext {
    pub fn new(identity: Identity, granted: Permission) -> Self {
        Self { identity, granted }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The permission the gate checked for this route.
    pub fn granted(&self) -> &Permission {
        &self.granted
    }
}
