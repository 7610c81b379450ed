//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Authorization denials are *not* errors: they are ordinary decision values.
/// This enum only covers malformed input handed to administrative operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a missing role name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A permission collection was not a list of permission names.
    #[error("invalid permission set: {0}")]
    InvalidPermissionSet(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_permission_set(msg: impl Into<String>) -> Self {
        Self::InvalidPermissionSet(msg.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidPermissionSet(_) => "invalid_permission_set",
        }
    }
}
