//! Tracking service for the directorate review board.

use std::sync::Arc;

use uuid::Uuid;

use super::error::TrackingError;
use super::types::{CreateActivityInput, ReviewStatus, StatusCounts, TrackedActivity};

/// Repository trait for tracked-activity persistence.
pub trait TrackingRepository: Send + Sync {
    /// Insert a new activity.
    fn insert(
        &self,
        input: CreateActivityInput,
    ) -> impl std::future::Future<Output = Result<TrackedActivity, TrackingError>> + Send;

    /// All activities, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TrackedActivity>, TrackingError>> + Send;

    /// Set an activity's status unconditionally.
    fn set_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> impl std::future::Future<Output = Result<TrackedActivity, TrackingError>> + Send;

    /// Distinct recipient names previously used, for the suggestion list.
    fn recipient_names(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, TrackingError>> + Send;
}

/// Service for managing tracked activities and their review status.
pub struct TrackingService<R: TrackingRepository> {
    repo: Arc<R>,
}

impl<R: TrackingRepository> TrackingService<R> {
    /// Create a new tracking service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a tracked activity with an operator-chosen initial status.
    ///
    /// # Errors
    ///
    /// Returns `Validation` when the title is empty.
    pub async fn create(
        &self,
        input: CreateActivityInput,
    ) -> Result<TrackedActivity, TrackingError> {
        if input.title.trim().is_empty() {
            return Err(TrackingError::validation("title must not be empty"));
        }
        self.repo.insert(input).await
    }

    /// All activities, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn list(&self) -> Result<Vec<TrackedActivity>, TrackingError> {
        self.repo.list().await
    }

    /// Per-status tallies for the board header.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn status_counts(&self) -> Result<StatusCounts, TrackingError> {
        Ok(StatusCounts::tally(&self.repo.list().await?))
    }

    /// Move an activity to a new status.
    ///
    /// Every ordered pair of states is accepted, self-transitions
    /// included; the status is advisory, not an approval pipeline.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the activity does not exist.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<TrackedActivity, TrackingError> {
        self.repo.set_status(id, status).await
    }

    /// Distinct recipient names for the suggestion list.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository fails.
    pub async fn recipient_names(&self) -> Result<Vec<String>, TrackingError> {
        self.repo.recipient_names().await
    }
}
