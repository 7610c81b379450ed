use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};

use gatehouse_auth::{AuthorizationEngine, Identity};

use crate::app::errors;
use crate::authz::RequiredPermission;
use crate::context::IdentityContext;

/// Per-route gate configuration, fixed at route registration.
#[derive(Debug, Clone)]
pub struct GateState {
    pub engine: AuthorizationEngine,
    pub identity_header: HeaderName,
    pub required: RequiredPermission,
}

/// Authorize the caller before the protected handler runs.
///
/// On any denial the handler is not invoked and a JSON error is returned
/// (401 for missing/unknown identity, 403 for a missing permission).
pub async fn gate_middleware(
    State(gate): State<GateState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = extract_identity(req.headers(), &gate.identity_header)
        .map(Identity::from)
        .unwrap_or_default();

    let required = gate.required.permission();
    let decision = gate.engine.authorize(identity.as_str(), required);

    if let Some(denial) = decision.denial() {
        return errors::denial_to_response(denial);
    }

    req.extensions_mut()
        .insert(IdentityContext::new(identity, required.clone()));

    next.run(req).await
}

/// Read the caller identity from the single configured header.
///
/// A repeated header is ambiguous and treated as absent, as are non-text and
/// empty values. Credential headers are never consulted.
fn extract_identity<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    let mut values = headers.get_all(name).iter();
    let value = values.next()?;
    if values.next().is_some() {
        return None;
    }

    let value = value.to_str().ok()?;
    if value.is_empty() {
        return None;
    }

    Some(value)
}
