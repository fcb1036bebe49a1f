//! `SeaORM` Entity for the tracked_activities table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A document routed to the directorate for review.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tracked_activities")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Title shown on the board.
    #[sea_orm(column_type = "Text")]
    pub title: String,
    /// Free-text document reference.
    pub document_number: String,
    /// Recipient name, free text.
    pub recipient_name: String,
    /// Date of the underlying document.
    pub created_date: Date,
    /// Review status: pending, in_review, or approved (CHECK constraint).
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// No relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
