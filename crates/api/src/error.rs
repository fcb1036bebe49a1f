//! Error-to-HTTP mapping.
//!
//! Domain errors convert into the shared `AppError` taxonomy, which
//! carries the HTTP status and error code; the response body is
//! `{"error": <code>, "message": <text>}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use despacho_core::attachment::AttachmentError;
use despacho_core::numbering::NumberingError;
use despacho_core::storage::StorageError;
use despacho_core::tracking::TrackingError;
use despacho_shared::AppError;

/// HTTP-facing error wrapper around `AppError`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<NumberingError> for ApiError {
    fn from(err: NumberingError) -> Self {
        let app = match err {
            NumberingError::InvalidYear(_) => AppError::Validation(err.to_string()),
            NumberingError::DuplicateNumber { .. } | NumberingError::AttemptsExhausted { .. } => {
                AppError::Conflict(err.to_string())
            }
            NumberingError::NotFound(_) => AppError::NotFound(err.to_string()),
            NumberingError::Repository(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<AttachmentError> for ApiError {
    fn from(err: AttachmentError) -> Self {
        let app = match err {
            AttachmentError::UnsupportedFileType(_) => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            AttachmentError::DocumentNotFound(_) | AttachmentError::NoAttachment(_) => {
                AppError::NotFound(err.to_string())
            }
            AttachmentError::Storage(StorageError::FileTooLarge { .. }) => {
                AppError::PayloadTooLarge(err.to_string())
            }
            AttachmentError::Storage(StorageError::InvalidMimeType { .. }) => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            AttachmentError::Storage(_) => AppError::ExternalService(err.to_string()),
            AttachmentError::Repository(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}

impl From<TrackingError> for ApiError {
    fn from(err: TrackingError) -> Self {
        let app = match err {
            TrackingError::NotFound(_) => AppError::NotFound(err.to_string()),
            TrackingError::Validation(_) => AppError::Validation(err.to_string()),
            TrackingError::Repository(_) => AppError::Database(err.to_string()),
        };
        Self(app)
    }
}
