//! `SeaORM` entity definitions.

pub mod documents;
pub mod tracked_activities;
