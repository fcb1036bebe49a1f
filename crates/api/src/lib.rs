//! HTTP API layer with Axum routes and extractors.
//!
//! This crate provides:
//! - REST API routes
//! - The acting-identity extractor
//! - Error-to-HTTP mapping
//! - The draft session registry

pub mod drafts;
pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use despacho_core::storage::StorageService;
use despacho_db::DocumentRepository;
use drafts::DraftSessions;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Blob storage for attachments.
    pub storage: Arc<StorageService>,
    /// Live draft sessions keyed by document id.
    pub drafts: Arc<DraftSessions<DocumentRepository>>,
}

impl AppState {
    /// Assemble the state from a database connection and storage service.
    #[must_use]
    pub fn new(db: DatabaseConnection, storage: StorageService) -> Self {
        let store = Arc::new(DocumentRepository::new(db.clone()));
        Self {
            db: Arc::new(db),
            storage: Arc::new(storage),
            drafts: Arc::new(DraftSessions::new(store)),
        }
    }
}


/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
