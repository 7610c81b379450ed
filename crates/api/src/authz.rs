//! Route-level authorization wiring.
//!
//! Each protected route declares exactly one [`RequiredPermission`] when it is
//! registered; the gate middleware checks it on every request.

use axum::http::HeaderName;
use axum::routing::MethodRouter;

use gatehouse_auth::{AuthorizationEngine, Permission};

use crate::middleware::{GateState, gate_middleware};

/// Header carrying the caller identity unless configured otherwise.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-email";

/// Operation descriptor: the single permission a route requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPermission(Permission);

impl RequiredPermission {
    pub fn new(permission: impl Into<Permission>) -> Self {
        Self(permission.into())
    }

    pub fn permission(&self) -> &Permission {
        &self.0
    }
}

/// Builds gated routes sharing one engine and one identity header.
#[derive(Debug, Clone)]
pub struct Gate {
    engine: AuthorizationEngine,
    identity_header: HeaderName,
}

impl Gate {
    pub fn new(engine: AuthorizationEngine, identity_header: HeaderName) -> Self {
        Self {
            engine,
            identity_header,
        }
    }

    /// Put `route` behind the gate, requiring `permission` on every request.
    pub fn protect<S>(
        &self,
        route: MethodRouter<S>,
        permission: impl Into<Permission>,
    ) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let state = GateState {
            engine: self.engine.clone(),
            identity_header: self.identity_header.clone(),
            required: RequiredPermission::new(permission),
        };
        route.layer(axum::middleware::from_fn_with_state(state, gate_middleware))
    }
}
