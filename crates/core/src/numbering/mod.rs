//! Correlative number allocation for official documents.
//!
//! Every outgoing document ("oficio") carries a year-scoped sequential
//! number. There is no central counter table: the allocator reads the
//! current maximum for the year and inserts `max + 1`, relying on the
//! store's UNIQUE (year, number) constraint to reject concurrent
//! duplicates, then retries with a fresh read up to a small bound.

mod error;
mod service;
mod types;

pub use error::NumberingError;
pub use service::{DocumentRepository, NumberAllocator};
pub use types::{
    AttachmentRef, CreateDocumentInput, HeaderPatch, NewDocumentRow, OfficialDocument,
    next_number,
};
