//! Official document routes: creation with correlative numbering,
//! header edits, attachments, and the debounced draft endpoint.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{AppState, error::ApiError, extractors::CurrentUser};
use despacho_core::attachment::{AttachmentService, UploadInput};
use despacho_core::numbering::{
    CreateDocumentInput, DocumentRepository as DocumentRepoTrait, HeaderPatch, NumberAllocator,
};
use despacho_db::DocumentRepository;
use despacho_shared::AppError;

/// Upload body ceiling: the configured per-file maximum plus multipart
/// framing overhead.
const MAX_UPLOAD_BODY: usize = 12 * 1024 * 1024;

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/{id}",
            get(get_document).patch(update_document),
        )
        .route(
            "/documents/{id}/attachment",
            post(upload_attachment).layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route(
            "/documents/{id}/attachment/view-url",
            get(attachment_view_url),
        )
        .route(
            "/documents/{id}/draft",
            put(put_draft).get(get_draft).delete(delete_draft),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Query parameters for the document list.
#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    /// Year to list; defaults to the current year.
    pub year: Option<i32>,
    /// Free-text filter over number and description.
    pub search: Option<String>,
}

/// Request body for creating a document.
#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    /// Year to allocate the number in.
    pub year: i32,
    /// Short description.
    pub description: String,
    /// Document date; defaults to today.
    pub created_date: Option<NaiveDate>,
}

/// Request body for editing the document header.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    /// New description, when present.
    pub description: Option<String>,
    /// New document date, when present.
    pub created_date: Option<NaiveDate>,
}

/// Request body for a draft write.
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    /// Latest rich-text body, when the body changed.
    pub editor_content: Option<String>,
    /// Latest document date, when the date field changed.
    pub created_date: Option<NaiveDate>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/documents?year=YYYY&search=`
/// List documents for a year, highest number first.
async fn list_documents(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let allocator = NumberAllocator::new(repo);

    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let documents = allocator.list(year, query.search.as_deref()).await?;

    Ok(Json(json!({ "documents": documents })))
}

/// POST `/documents`
/// Create a document with the next free correlative number.
async fn create_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let allocator = NumberAllocator::new(repo);

    let input = CreateDocumentInput {
        year: payload.year,
        description: payload.description,
        created_date: payload.created_date.unwrap_or_else(|| Utc::now().date_naive()),
        author_name: user.0.display_name,
    };

    let document = allocator.create(input).await?;
    info!(
        document_id = %document.id,
        year = document.year,
        number = document.number,
        "document created"
    );

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET `/documents/{id}`
async fn get_document(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let allocator = NumberAllocator::new(repo);

    let document = allocator.get(id).await?;
    Ok(Json(document))
}

/// PATCH `/documents/{id}`
/// Edit the header fields (description, document date).
async fn update_document(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let allocator = NumberAllocator::new(repo);

    let patch = HeaderPatch {
        description: payload.description,
        created_date: payload.created_date,
    };

    let document = allocator.update_header(id, patch).await?;
    Ok(Json(document))
}

/// POST `/documents/{id}/attachment`
/// Upload or replace the document's file (multipart `file` field).
async fn upload_attachment(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut input = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("attachment").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?
            .to_vec();

        input = Some(UploadInput {
            document_id: id,
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let Some(input) = input else {
        return Err(AppError::Validation("missing multipart field 'file'".to_string()).into());
    };

    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let service = AttachmentService::new(repo, Arc::clone(&state.storage));

    let attachment = service.upload(input).await?;
    info!(document_id = %id, file_name = %attachment.file_name, "attachment stored");

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// GET `/documents/{id}/attachment/view-url`
/// Browser-viewable URL: Word files wrap in the Office Online viewer,
/// PDFs pass through unchanged.
async fn attachment_view_url(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = Arc::new(DocumentRepository::new((*state.db).clone()));
    let service = AttachmentService::new(repo, Arc::clone(&state.storage));

    let view_url = service.view_url_for(id).await?;
    Ok(Json(json!({ "view_url": view_url })))
}

/// PUT `/documents/{id}/draft`
/// Feed the latest editor values into the debounce window. Returns 202;
/// the durable write happens after the quiet window.
async fn put_draft(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DraftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = DocumentRepository::new((*state.db).clone());
    if repo.find_by_id(id).await?.is_none() {
        return Err(AppError::NotFound(format!("document not found: {id}")).into());
    }

    let session = state.drafts.session(id);
    if let Some(editor_content) = payload.editor_content {
        session.edit_content(editor_content);
    }
    if let Some(created_date) = payload.created_date {
        session.edit_date(created_date);
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "saving": session.is_saving() })),
    ))
}

/// GET `/documents/{id}/draft`
/// Report the saving flag for the document's editing session.
async fn get_draft(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let saving = state.drafts.get(id).is_some_and(|s| s.is_saving());
    Ok(Json(json!({ "saving": saving })))
}

/// DELETE `/documents/{id}/draft`
/// Close the editing session and cancel pending timers.
async fn delete_draft(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.drafts.close(id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, request::Builder};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    use crate::{create_router, test_support};
    use despacho_db::entities::documents;

    fn with_identity(builder: Builder) -> Builder {
        builder
            .header("x-user-id", Uuid::new_v4().to_string())
            .header("x-user-name", "Ana Lopez")
            .header("x-user-email", "ana@example.com")
    }

    #[tokio::test]
    async fn test_request_without_identity_headers_is_rejected() {
        let app = create_router(test_support::state(test_support::empty_db()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_unknown_document_returns_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<documents::Model>::new()])
            .into_connection();
        let app = create_router(test_support::state(db));

        let request = with_identity(
            Request::builder().uri(format!("/api/v1/documents/{}", Uuid::new_v4())),
        )
        .body(Body::empty())
        .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_draft_status_without_session_reports_not_saving() {
        let app = create_router(test_support::state(test_support::empty_db()));

        let request = with_identity(
            Request::builder().uri(format!("/api/v1/documents/{}/draft", Uuid::new_v4())),
        )
        .body(Body::empty())
        .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["saving"], false);
    }

    #[tokio::test]
    async fn test_close_draft_returns_no_content() {
        let app = create_router(test_support::state(test_support::empty_db()));

        let request = with_identity(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/documents/{}/draft", Uuid::new_v4())),
        )
        .body(Body::empty())
        .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
