//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_person::PersonError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error")]
    Validation(Vec<String>),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Validation failed".to_string(),
                Some(errors),
            ),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message, .. } => ApiError::Validation(vec![message]),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Connection { .. }
            | PortError::ServiceUnavailable { .. } => ApiError::ServiceUnavailable(err.to_string()),
            PortError::Transformation { .. } | PortError::Internal { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<PersonError> for ApiError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::PersonNotFound(id) => ApiError::NotFound(format!("Person {} not found", id)),
            PersonError::InvalidData(msg) => ApiError::BadRequest(msg),
            PersonError::ValidationFailed(errors) => ApiError::Validation(errors),
            PersonError::UsernameTaken(name) => {
                ApiError::Conflict(format!("Username '{}' is already taken", name))
            }
            PersonError::Credential(msg) => ApiError::Internal(msg),
            PersonError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Validation(vec!["x".into()]), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_person_errors_map_through() {
        assert!(matches!(
            ApiError::from(PersonError::not_found("7")),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(PersonError::Store(PortError::not_found("Document", "7"))),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(PersonError::Store(PortError::connection("down"))),
            ApiError::ServiceUnavailable(_)
        ));
        assert!(matches!(
            ApiError::from(PersonError::UsernameTaken("elif".into())),
            ApiError::Conflict(msg) if msg == "Username 'elif' is already taken"
        ));
    }
}
