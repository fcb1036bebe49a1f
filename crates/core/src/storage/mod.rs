//! Blob storage for document attachments using Apache OpenDAL.
//!
//! Vendor-agnostic object storage with support for:
//! - S3-compatible: Supabase Storage, Cloudflare R2, AWS S3
//! - Local filesystem (development only)
//!
//! Unlike presign-based designs, attachments here are served from a
//! public bucket: the service writes the object and derives a durable
//! public URL from the configured base URL.

mod config;
mod error;
mod service;

pub(crate) use service::sanitize_key_fragment;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{ObjectMetadata, StorageService};
