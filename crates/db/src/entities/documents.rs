//! `SeaORM` Entity for the documents table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An official outgoing document row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Unique identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Correlative number; UNIQUE together with `year`.
    pub number: i32,
    /// Year scope of the correlative number.
    pub year: i32,
    /// Short description.
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// User-editable document date.
    pub created_date: Date,
    /// Author display name, immutable after creation.
    pub author_name: String,
    /// Public URL of the attachment, if any.
    pub file_url: Option<String>,
    /// Original filename of the attachment, if any.
    pub file_name: Option<String>,
    /// Rich-text body; null until the first editor save.
    #[sea_orm(column_type = "Text", nullable)]
    pub editor_content: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// No relations; documents stand alone.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
