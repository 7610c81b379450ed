use axum::http::StatusCode;

/// Liveness probe; not gated.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
