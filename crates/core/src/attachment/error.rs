//! Attachment error types.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Attachment operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// MIME type outside the PDF/Word allowlist.
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Owning document not found.
    #[error("document not found: {0}")]
    DocumentNotFound(Uuid),

    /// Document has no attachment to resolve a view URL for.
    #[error("document {0} has no attachment")]
    NoAttachment(Uuid),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AttachmentError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
