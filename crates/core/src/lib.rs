//! Core business logic for Despacho.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. Persistence is abstracted behind repository traits that
//! the db crate implements; blob storage behind the `BlobStore` trait.
//!
//! # Modules
//!
//! - `numbering` - Year-scoped correlative number allocation for documents
//! - `attachment` - Attachment upload, replacement, and view-URL mapping
//! - `storage` - OpenDAL-backed blob storage with public URLs
//! - `draft` - Debounced autosave for the document editor
//! - `tracking` - Review-status workflow for documents in the directorate

pub mod attachment;
pub mod draft;
pub mod numbering;
pub mod storage;
pub mod tracking;
