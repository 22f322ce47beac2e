/**
 * Error Conversion
 *
 * `IntoResponse` for backend errors, so handlers can return
 * `Result<_, BackendError>` and rely on `?`.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 500
 * }
 * ```
 */

use axum::{
    response::{Response, IntoResponse},
    http::{header::CONTENT_TYPE, StatusCode},
    body::Body,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
