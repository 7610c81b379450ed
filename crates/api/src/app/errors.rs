use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::de::DeserializeOwned;
use serde_json::json;

use gatehouse_auth::{DenialKind, DomainError};

/// Map a gate denial to its HTTP response.
///
/// The body names the denial kind only; the caller never learns which role or
/// permission would have succeeded.
pub fn denial_to_response(kind: DenialKind) -> axum::response::Response {
    let status = match kind {
        DenialKind::NoIdentity | DenialKind::UnknownIdentity => StatusCode::UNAUTHORIZED,
        DenialKind::InsufficientPermission => StatusCode::FORBIDDEN,
    };
    json_error(status, kind.code(), kind.message())
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(_) | DomainError::InvalidPermissionSet(_) => {
            json_error(StatusCode::BAD_REQUEST, err.code(), err.to_string())
        }
    }
}

/// Decode an admin request body, answering every failure with a 400
/// `validation_error` JSON body instead of axum's plain-text rejection.
///
/// The body must be a JSON object; serde would otherwise read a positional
/// array into the request struct.
pub fn json_body<T: DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, axum::response::Response> {
    let Json(value) = payload.map_err(|rejection| {
        json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            rejection.body_text(),
        )
    })?;

    if !value.is_object() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "request body must be a JSON object",
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!("invalid request body: {e}"),
        )
    })
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
