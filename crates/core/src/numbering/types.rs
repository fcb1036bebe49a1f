//! Document domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Durable public URL of the stored file.
    pub url: String,
    /// Original filename as uploaded.
    pub file_name: String,
}

/// An official outgoing document ("oficio").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialDocument {
    /// Unique identifier.
    pub id: Uuid,
    /// Correlative number, unique within `year`.
    pub number: i32,
    /// Year the number is scoped to.
    pub year: i32,
    /// Short description of the document.
    pub description: String,
    /// User-editable document date.
    pub created_date: NaiveDate,
    /// Display name of the creating identity; immutable after creation.
    pub author_name: String,
    /// Optional attachment (set or replaced any number of times).
    pub attachment: Option<AttachmentRef>,
    /// Rich-text body; None until the first editor save.
    pub editor_content: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new document.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// Year to allocate the correlative number in.
    pub year: i32,
    /// Short description.
    pub description: String,
    /// Document date (defaults to today at the call site).
    pub created_date: NaiveDate,
    /// Display name of the acting identity.
    pub author_name: String,
}

/// A fully-determined row handed to the repository for insertion.
///
/// The allocator fills in `number` after reading the current maximum;
/// insertion fails with `DuplicateNumber` when another session won the
/// same number first.
#[derive(Debug, Clone)]
pub struct NewDocumentRow {
    /// Pre-generated identifier.
    pub id: Uuid,
    /// Allocated correlative number.
    pub number: i32,
    /// Year scope.
    pub year: i32,
    /// Short description.
    pub description: String,
    /// Document date.
    pub created_date: NaiveDate,
    /// Author display name.
    pub author_name: String,
}

/// Patch for the header fields editable from the document detail view.
#[derive(Debug, Clone, Default)]
pub struct HeaderPatch {
    /// New description, when present.
    pub description: Option<String>,
    /// New document date, when present.
    pub created_date: Option<NaiveDate>,
}

/// Next correlative number given the current maximum for a year.
#[must_use]
pub fn next_number(current_max: Option<i32>) -> i32 {
    current_max.map_or(1, |max| max + 1)
}
