//! Initial database migration.
//!
//! Creates the documents and tracked_activities tables with their
//! constraints and indexes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(TRACKED_ACTIVITIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    number INTEGER NOT NULL,
    year INTEGER NOT NULL,
    description TEXT NOT NULL,
    created_date DATE NOT NULL,
    author_name VARCHAR(255) NOT NULL,
    file_url TEXT,
    file_name VARCHAR(255),
    editor_content TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_documents_number_positive CHECK (number > 0),
    CONSTRAINT uq_documents_year_number UNIQUE (year, number)
);

CREATE INDEX idx_documents_year_number ON documents(year, number DESC);
CREATE INDEX idx_documents_created_date ON documents(created_date DESC);
";

const TRACKED_ACTIVITIES_SQL: &str = r"
CREATE TABLE tracked_activities (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    title TEXT NOT NULL,
    document_number VARCHAR(100) NOT NULL,
    recipient_name VARCHAR(255) NOT NULL,
    created_date DATE NOT NULL,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_tracked_activities_status CHECK (
        status IN ('pending', 'in_review', 'approved')
    )
);

CREATE INDEX idx_tracked_activities_status ON tracked_activities(status);
CREATE INDEX idx_tracked_activities_created_at ON tracked_activities(created_at DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS tracked_activities CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
";
