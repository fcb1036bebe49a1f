//! Tracking domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Advisory review status of a tracked activity.
///
/// Purely informational: operators move activities between states in
/// any order, so no transition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Waiting to be looked at.
    #[default]
    Pending,
    /// Currently under review.
    InReview,
    /// Review finished.
    Approved,
}

impl ReviewStatus {
    /// All states, in board display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InReview, Self::Approved];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_review" => Some(Self::InReview),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A document routed to the directorate for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedActivity {
    /// Unique identifier.
    pub id: Uuid,
    /// Title shown on the board.
    pub title: String,
    /// Free-text document reference; not validated against documents.
    pub document_number: String,
    /// Recipient, free text drawn from previously used names.
    pub recipient_name: String,
    /// Date of the underlying document.
    pub created_date: NaiveDate,
    /// Advisory review status.
    pub status: ReviewStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a tracked activity.
#[derive(Debug, Clone)]
pub struct CreateActivityInput {
    /// Title shown on the board.
    pub title: String,
    /// Free-text document reference.
    pub document_number: String,
    /// Recipient name.
    pub recipient_name: String,
    /// Date of the underlying document.
    pub created_date: NaiveDate,
    /// Initial status chosen by the operator.
    pub status: ReviewStatus,
}

/// Per-status tallies for the tracking board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Activities pending review.
    pub pending: usize,
    /// Activities under review.
    pub in_review: usize,
    /// Approved activities.
    pub approved: usize,
}

impl StatusCounts {
    /// Tally a list of activities.
    #[must_use]
    pub fn tally(activities: &[TrackedActivity]) -> Self {
        let mut counts = Self::default();
        for activity in activities {
            match activity.status {
                ReviewStatus::Pending => counts.pending += 1,
                ReviewStatus::InReview => counts.in_review += 1,
                ReviewStatus::Approved => counts.approved += 1,
            }
        }
        counts
    }
}
