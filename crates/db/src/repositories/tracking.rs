//! Tracked activity repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::entities::tracked_activities;
use despacho_core::tracking::{
    CreateActivityInput, ReviewStatus, TrackedActivity, TrackingError,
    TrackingRepository as TrackingRepoTrait,
};

/// Tracked activity repository implementation.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    db: DatabaseConnection,
}

impl ActivityRepository {
    /// Create a new activity repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TrackingRepoTrait for ActivityRepository {
    async fn insert(&self, input: CreateActivityInput) -> Result<TrackedActivity, TrackingError> {
        let active_model = tracked_activities::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            document_number: Set(input.document_number),
            recipient_name: Set(input.recipient_name),
            created_date: Set(input.created_date),
            status: Set(input.status.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| TrackingError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn list(&self) -> Result<Vec<TrackedActivity>, TrackingError> {
        let models = tracked_activities::Entity::find()
            .order_by_desc(tracked_activities::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TrackingError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ReviewStatus,
    ) -> Result<TrackedActivity, TrackingError> {
        let model = tracked_activities::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TrackingError::repository(e.to_string()))?
            .ok_or(TrackingError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.status = Set(status.as_str().to_string());

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| TrackingError::repository(e.to_string()))?;

        Ok(to_domain(updated))
    }

    async fn recipient_names(&self) -> Result<Vec<String>, TrackingError> {
        let names: Vec<String> = tracked_activities::Entity::find()
            .select_only()
            .column(tracked_activities::Column::RecipientName)
            .distinct()
            .order_by_asc(tracked_activities::Column::RecipientName)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| TrackingError::repository(e.to_string()))?;

        Ok(names)
    }
}

/// Convert a database model to the domain type.
///
/// The status column carries a CHECK constraint, so an unparseable
/// value cannot come back from the store; fall back to the default
/// rather than panic.
fn to_domain(model: tracked_activities::Model) -> TrackedActivity {
    TrackedActivity {
        id: model.id,
        title: model.title,
        document_number: model.document_number,
        recipient_name: model.recipient_name,
        created_date: model.created_date,
        status: ReviewStatus::parse(&model.status).unwrap_or_default(),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
