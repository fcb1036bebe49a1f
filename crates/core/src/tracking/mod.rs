//! Review-status tracking for documents routed to the directorate.
//!
//! A tracked activity carries an advisory status (pending, in review,
//! approved) set explicitly by an operator. The status machine is flat
//! and fully connected: any state can move to any other, including
//! itself; there are no guards and no terminal state.

mod error;
mod service;
mod types;

pub use error::TrackingError;
pub use service::{TrackingRepository, TrackingService};
pub use types::{CreateActivityInput, ReviewStatus, StatusCounts, TrackedActivity};
