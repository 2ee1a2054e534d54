/**
 * Error Funnel
 *
 * The single place where a raised failure becomes an HTTP response. Domain
 * failures carry their own status and message; everything else is collapsed
 * into a generic 500 so internal detail never reaches the client.
 *
 * # Response Format
 *
 * ```json
 * {"error": "post not found"}
 * ```
 *
 * Validation failures instead list every collected message:
 *
 * ```json
 * {"errors": ["title is required", "body must be a string"]}
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation { errors } => {
                tracing::debug!(?errors, "request rejected by validation");
                json!({ "errors": errors })
            }
            ApiError::System { detail } => {
                // Log the real cause, answer with a generic message.
                tracing::error!(%detail, "unexpected failure while handling request");
                json!({ "error": "something went wrong, please contact support" })
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "request failed");
                json!({ "error": other.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
