//! Tracking error types.

use thiserror::Error;
use uuid::Uuid;

/// Tracking operation errors.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Activity not found.
    #[error("tracked activity not found: {0}")]
    NotFound(Uuid),

    /// Invalid input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl TrackingError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
