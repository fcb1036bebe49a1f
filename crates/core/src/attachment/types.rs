//! Attachment types.

use uuid::Uuid;

/// MIME types accepted for upload. Checked before any network
/// interaction; everything else fails with `UnsupportedFileType`.
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Input for uploading an attachment.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// Owning document.
    pub document_id: Uuid,
    /// Original filename.
    pub file_name: String,
    /// MIME type of the file.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}
