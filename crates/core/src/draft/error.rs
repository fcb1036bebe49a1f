//! Draft persistence error types.

use thiserror::Error;
use uuid::Uuid;

/// Draft persistence errors.
#[derive(Debug, Error)]
pub enum DraftError {
    /// Document no longer resolves; fatal for the editing session.
    #[error("document not found: {0}")]
    NotFound(Uuid),

    /// Durable write failed; logged, never interrupts editing.
    #[error("draft store error: {0}")]
    Store(String),
}

impl DraftError {
    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
