//! Document repository for database operations.
//!
//! One repository backs the numbering, attachment, and draft sides of
//! document persistence; they are different views of the same table.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::documents;
use despacho_core::attachment::{AttachmentError, AttachmentRepository as AttachmentRepoTrait};
use despacho_core::draft::{DraftError, DraftPatch, DraftStore};
use despacho_core::numbering::{
    AttachmentRef, DocumentRepository as DocumentRepoTrait, HeaderPatch, NewDocumentRow,
    NumberingError, OfficialDocument,
};

/// Document repository implementation.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Create a new document repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DocumentRepoTrait for DocumentRepository {
    async fn max_number_for_year(&self, year: i32) -> Result<Option<i32>, NumberingError> {
        let top = documents::Entity::find()
            .filter(documents::Column::Year.eq(year))
            .order_by_desc(documents::Column::Number)
            .one(&self.db)
            .await
            .map_err(|e| NumberingError::repository(e.to_string()))?;

        Ok(top.map(|d| d.number))
    }

    async fn insert(&self, row: NewDocumentRow) -> Result<OfficialDocument, NumberingError> {
        let now = Utc::now();
        let active_model = documents::ActiveModel {
            id: Set(row.id),
            number: Set(row.number),
            year: Set(row.year),
            description: Set(row.description),
            created_date: Set(row.created_date),
            author_name: Set(row.author_name),
            file_url: Set(None),
            file_name: Set(None),
            editor_content: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        match active_model.insert(&self.db).await {
            Ok(model) => Ok(to_domain(model)),
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    Err(NumberingError::DuplicateNumber {
                        year: row.year,
                        number: row.number,
                    })
                } else {
                    Err(NumberingError::repository(e.to_string()))
                }
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OfficialDocument>, NumberingError> {
        let model = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| NumberingError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn list_by_year(&self, year: i32) -> Result<Vec<OfficialDocument>, NumberingError> {
        let models = documents::Entity::find()
            .filter(documents::Column::Year.eq(year))
            .order_by_desc(documents::Column::Number)
            .all(&self.db)
            .await
            .map_err(|e| NumberingError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn update_header(
        &self,
        id: Uuid,
        patch: HeaderPatch,
    ) -> Result<OfficialDocument, NumberingError> {
        let model = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| NumberingError::repository(e.to_string()))?
            .ok_or(NumberingError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        if let Some(created_date) = patch.created_date {
            active_model.created_date = Set(created_date);
        }
        active_model.updated_at = Set(Utc::now().into());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| NumberingError::repository(e.to_string()))?;

        Ok(to_domain(updated))
    }
}

impl AttachmentRepoTrait for DocumentRepository {
    async fn document_exists(&self, id: Uuid) -> Result<bool, AttachmentError> {
        let count: u64 = documents::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn set_attachment(
        &self,
        id: Uuid,
        attachment: AttachmentRef,
    ) -> Result<(), AttachmentError> {
        let model = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?
            .ok_or(AttachmentError::DocumentNotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.file_url = Set(Some(attachment.url));
        active_model.file_name = Set(Some(attachment.file_name));
        active_model.updated_at = Set(Utc::now().into());

        active_model
            .update(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(())
    }

    async fn attachment_of(&self, id: Uuid) -> Result<Option<AttachmentRef>, AttachmentError> {
        let model = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?
            .ok_or(AttachmentError::DocumentNotFound(id))?;

        Ok(to_domain(model).attachment)
    }
}

impl DraftStore for DocumentRepository {
    async fn save_draft(&self, document_id: Uuid, patch: DraftPatch) -> Result<(), DraftError> {
        let model = documents::Entity::find_by_id(document_id)
            .one(&self.db)
            .await
            .map_err(|e| DraftError::store(e.to_string()))?
            .ok_or(DraftError::NotFound(document_id))?;

        let mut active_model = model.into_active_model();
        if let Some(editor_content) = patch.editor_content {
            active_model.editor_content = Set(Some(editor_content));
        }
        if let Some(created_date) = patch.created_date {
            active_model.created_date = Set(created_date);
        }
        active_model.updated_at = Set(Utc::now().into());

        active_model
            .update(&self.db)
            .await
            .map_err(|e| DraftError::store(e.to_string()))?;

        Ok(())
    }
}

/// Convert a database model to the domain type.
fn to_domain(model: documents::Model) -> OfficialDocument {
    let attachment = match (model.file_url, model.file_name) {
        (Some(url), Some(file_name)) => Some(AttachmentRef { url, file_name }),
        _ => None,
    };

    OfficialDocument {
        id: model.id,
        number: model.number,
        year: model.year,
        description: model.description,
        created_date: model.created_date,
        author_name: model.author_name,
        attachment,
        editor_content: model.editor_content,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
