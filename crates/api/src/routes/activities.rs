//! Tracked activity routes for the directorate review board.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::CurrentUser};
use despacho_core::tracking::{CreateActivityInput, ReviewStatus, StatusCounts, TrackingService};
use despacho_db::ActivityRepository;

/// Creates the activity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/recipients", get(list_recipients))
        .route("/activities/{id}/status", put(set_status))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a tracked activity.
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    /// Title shown on the board.
    pub title: String,
    /// Free-text document reference.
    pub document_number: String,
    /// Recipient name.
    pub recipient_name: String,
    /// Date of the underlying document.
    pub created_date: NaiveDate,
    /// Initial status; defaults to pending.
    #[serde(default)]
    pub status: ReviewStatus,
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status.
    pub status: ReviewStatus,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/activities`
/// All activities, newest first, with per-status tallies for the board.
async fn list_activities(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(ActivityRepository::new((*state.db).clone()));
    let service = TrackingService::new(repo);

    // One fetch serves both the listing and the board tallies.
    let activities = service.list().await?;
    let counts = StatusCounts::tally(&activities);

    Ok(Json(json!({
        "activities": activities,
        "counts": counts,
    })))
}

/// POST `/activities`
async fn create_activity(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(ActivityRepository::new((*state.db).clone()));
    let service = TrackingService::new(repo);

    let input = CreateActivityInput {
        title: payload.title,
        document_number: payload.document_number,
        recipient_name: payload.recipient_name,
        created_date: payload.created_date,
        status: payload.status,
    };

    let activity = service.create(input).await?;
    info!(activity_id = %activity.id, "tracked activity created");

    Ok((StatusCode::CREATED, Json(activity)))
}

/// PUT `/activities/{id}/status`
/// Set the advisory status. Every ordered pair of states is accepted.
async fn set_status(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(ActivityRepository::new((*state.db).clone()));
    let service = TrackingService::new(repo);

    let activity = service.set_status(id, payload.status).await?;
    info!(activity_id = %id, status = %activity.status, "activity status changed");

    Ok(Json(activity))
}

/// GET `/activities/recipients`
/// Distinct recipient names previously used, for the suggestion list.
async fn list_recipients(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(ActivityRepository::new((*state.db).clone()));
    let service = TrackingService::new(repo);

    let recipients = service.recipient_names().await?;
    Ok(Json(json!({ "recipients": recipients })))
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    use crate::{create_router, test_support};
    use despacho_db::entities::tracked_activities;

    fn activity_row(title: &str, status: &str) -> tracked_activities::Model {
        tracked_activities::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
            document_number: "045-2026".to_string(),
            recipient_name: "Dirección Regional".to_string(),
            created_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            status: status.to_string(),
            created_at: Utc::now().fixed_offset(),
        }
    }

    // The mock serves exactly one result set; the listing and its
    // board tallies must come from a single fetch.
    #[tokio::test]
    async fn test_list_fetches_once_and_tallies_counts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                activity_row("Informe anual", "approved"),
                activity_row("Oficio circular", "pending"),
            ]])
            .into_connection();
        let app = create_router(test_support::state(db));

        let request = Request::builder()
            .uri("/api/v1/activities")
            .header("x-user-id", Uuid::new_v4().to_string())
            .header("x-user-name", "Ana Lopez")
            .header("x-user-email", "ana@example.com")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["activities"].as_array().unwrap().len(), 2);
        assert_eq!(body["counts"]["pending"], 1);
        assert_eq!(body["counts"]["in_review"], 0);
        assert_eq!(body["counts"]["approved"], 1);
    }
}
