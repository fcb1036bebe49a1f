//! Attachment management for official documents.
//!
//! A document carries at most one attachment (PDF or Word). This module
//! validates the MIME type before any I/O, writes the file to blob
//! storage under a collision-resistant key, and associates the resulting
//! public URL with the owning document. Re-uploading replaces the
//! association; the previous blob is left behind.

mod error;
mod service;
mod types;
mod view_url;

pub use error::AttachmentError;
pub use service::{AttachmentRepository, AttachmentService, BlobStore};
pub use types::{ALLOWED_MIME_TYPES, UploadInput};
pub use view_url::view_url;
