//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::Response;
use uuid::Uuid;

use crate::error::ApiError;
use despacho_shared::{AppError, Identity};

/// The acting identity, taken from headers stamped by the upstream
/// auth proxy: `x-user-id`, `x-user-name`, `x-user-email`.
///
/// Requests missing any of the three are rejected with 401; this
/// service performs no authentication of its own.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, "x-user-id")?;
        let id = Uuid::parse_str(&id).map_err(|_| {
            unauthorized(format!("invalid x-user-id header: {id}"))
        })?;

        let display_name = header_value(parts, "x-user-name")?;
        let email = header_value(parts, "x-user-email")?;

        Ok(Self(Identity::new(id, display_name, email)))
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<String, Response> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| unauthorized(format!("missing {name} header")))
}

fn unauthorized(message: String) -> Response {
    use axum::response::IntoResponse;
    ApiError(AppError::Unauthorized(message)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_extracts_identity_from_headers() {
        let id = Uuid::new_v4();
        let mut parts = parts_with_headers(&[
            ("x-user-id", &id.to_string()),
            ("x-user-name", "Ana Lopez"),
            ("x-user-email", "ana@example.com"),
        ]);

        let user = CurrentUser::from_request_parts(&mut parts, &())
            .await
            .expect("should extract");

        assert_eq!(user.0.id, id);
        assert_eq!(user.0.display_name, "Ana Lopez");
        assert_eq!(user.0.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_rejects_missing_headers() {
        let mut parts = parts_with_headers(&[]);
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        let response = result.expect_err("should reject");
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_rejects_malformed_user_id() {
        let mut parts = parts_with_headers(&[
            ("x-user-id", "not-a-uuid"),
            ("x-user-name", "Ana Lopez"),
            ("x-user-email", "ana@example.com"),
        ]);
        let result = CurrentUser::from_request_parts(&mut parts, &()).await;
        let response = result.expect_err("should reject");
        assert_eq!(response.status(), 401);
    }
}
