//! Numbering error types.

use thiserror::Error;
use uuid::Uuid;

/// Numbering operation errors.
#[derive(Debug, Error)]
pub enum NumberingError {
    /// Year is not a four-digit integer.
    #[error("invalid year: {0} (expected a four-digit year)")]
    InvalidYear(i32),

    /// Another session inserted the same (year, number) pair first.
    ///
    /// Retryable: the allocator re-reads the maximum and tries again.
    #[error("correlative number {number} already taken for year {year}")]
    DuplicateNumber {
        /// Year scope.
        year: i32,
        /// The colliding number.
        number: i32,
    },

    /// Retry bound reached under sustained contention.
    #[error("could not allocate a number for year {year} after {attempts} attempts")]
    AttemptsExhausted {
        /// Year scope.
        year: i32,
        /// Number of attempts made.
        attempts: u32,
    },

    /// Document not found.
    #[error("document not found: {0}")]
    NotFound(Uuid),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl NumberingError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
