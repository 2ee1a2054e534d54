/**
 * Domain Failure Types
 *
 * This module defines the failure taxonomy shared by every pipeline stage.
 * Each variant carries the information needed to build the client-facing
 * response; anything that is not a domain failure is wrapped as `System`
 * and surfaces as a generic 500.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// A failure raised by a pipeline stage.
///
/// Domain failures map directly to a client-facing status and message.
/// `System` is the catch-all for unexpected faults (store unreachable,
/// programming error); its detail is logged but never sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input failed schema validation. Carries one message per
    /// failed check, all collected in a single pass.
    #[error("validation failed")]
    Validation {
        /// Human-readable messages, one per failed field check
        errors: Vec<String>,
    },

    /// Missing, malformed, expired, or otherwise unverifiable credentials.
    #[error("{message}")]
    Unauthorized { message: String },

    /// A referenced resource does not exist.
    #[error("{message}")]
    NotFound { message: String },

    /// A uniqueness constraint was violated (e.g. duplicate email).
    #[error("{message}")]
    Conflict { message: String },

    /// The requested integration is not configured on this deployment.
    #[error("{message}")]
    Unavailable { message: String },

    /// Unexpected fault. `detail` is for the server log only.
    #[error("{detail}")]
    System { detail: String },
}

impl ApiError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn system(detail: impl Into<String>) -> Self {
        Self::System {
            detail: detail.into(),
        }
    }

    /// The HTTP status this failure maps to.
    ///
    /// Conflicts map to 400 rather than 409: duplicate registration is
    /// reported as a plain bad request in the public contract.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::PRECONDITION_FAILED,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::System { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => {
                Self::conflict(format!("duplicate value for unique field '{field}'"))
            }
            other => Self::system(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                ApiError::validation(vec!["title is required".into()]),
                StatusCode::PRECONDITION_FAILED,
            ),
            (
                ApiError::unauthorized("invalid token"),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::not_found("post not found"), StatusCode::NOT_FOUND),
            (
                ApiError::conflict("email already registered"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::unavailable("mailing not configured"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ApiError::system("store unreachable"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status);
        }
    }

    #[test]
    fn test_duplicate_store_error_becomes_conflict() {
        let err: ApiError = StoreError::Duplicate {
            field: "email".to_string(),
        }
        .into();
        match err {
            ApiError::Conflict { message } => assert!(message.contains("email")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_store_error_becomes_system() {
        let bad = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ApiError = StoreError::Decode(bad).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
