//! Repository implementations backed by `SeaORM`.

mod document;
mod tracking;

pub use document::DocumentRepository;
pub use tracking::ActivityRepository;
