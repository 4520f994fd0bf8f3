/**
 * Error Conversion
 *
 * Converts backend errors into transport responses.
 *
 * # REST Response Format
 *
 * ```json
 * {
 *   "message": "Invalid input data",
 *   "status": 422,
 *   "data": [{ "field": "title", "message": "Invalid title" }]
 * }
 * ```
 *
 * `data` is present only for validation errors.
 *
 * # GraphQL
 *
 * GraphQL errors carry `{ status, details }` in their extensions.
 */

use async_graphql::ErrorExtensions;
use axum::{
    extract::multipart::MultipartError,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }

        let mut body = serde_json::json!({
            "message": self.message(),
            "status": status.as_u16(),
        });
        if !self.details().is_empty() {
            body["data"] = serde_json::to_value(self.details()).unwrap_or_default();
        }

        (status, Json(body)).into_response()
    }
}

impl ErrorExtensions for BackendError {
    fn extend(&self) -> async_graphql::Error {
        if self.is_internal() {
            tracing::error!("GraphQL operation failed: {}", self);
        }

        let status = self.graphql_status();
        let details = serde_json::to_value(self.details())
            .ok()
            .and_then(|json| async_graphql::Value::from_json(json).ok())
            .unwrap_or(async_graphql::Value::Null);

        async_graphql::Error::new(self.message()).extend_with(|_, e| {
            e.set("status", status);
            e.set("details", details);
        })
    }
}

impl From<MultipartError> for BackendError {
    fn from(err: MultipartError) -> Self {
        BackendError::invalid_field("body", err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::FieldError;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let error = BackendError::invalid_input(vec![
            FieldError::new("title", "Invalid title"),
            FieldError::new("content", "Invalid content"),
        ]);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["status"], 422);
        assert_eq!(body["data"][0]["field"], "title");
        assert_eq!(body["data"][1]["field"], "content");
    }

    #[tokio::test]
    async fn test_internal_response_hides_details() {
        let response = BackendError::internal("disk on fire").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_graphql_extensions() {
        let error = BackendError::invalid_field("title", "Invalid title").extend();
        let extensions = error.extensions.expect("extensions set");
        assert_eq!(extensions.get("status"), Some(&async_graphql::Value::from(422u16)));
        assert!(extensions.get("details").is_some());
        assert_eq!(error.message, "Invalid input data");
    }
}
