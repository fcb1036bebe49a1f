//! Debounced autosave for the document editor.
//!
//! Every keystroke in the editor reports the new value; durable writes
//! only happen after a quiet window with no further edits (2 s for the
//! body, 1 s for the date field). Intermediate values are never
//! persisted. Saves that fail are logged and observable through the
//! `saving` flag, but never interrupt the editing flow.

mod debounce;
mod error;
mod session;

pub use debounce::DebounceTimer;
pub use error::DraftError;
pub use session::{
    CONTENT_QUIET_WINDOW, DATE_QUIET_WINDOW, DraftPatch, DraftSession, DraftStore,
};
