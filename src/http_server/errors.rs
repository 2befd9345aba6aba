//! # HTTP Errors
//!
//! Maps phonebook failures onto status codes and `{"error": "..."}` bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::phonebook::PhonebookError;

/// Message returned for any unexpected store failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors surfaced to HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400 with a human-readable message
    #[error("{0}")]
    BadRequest(String),

    /// 404 for a missing person
    #[error("{0}")]
    NotFound(String),

    /// 404 for a path no route matches
    #[error("unknown endpoint")]
    UnknownEndpoint,

    /// 500; details go to the log only
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PhonebookError> for ApiError {
    fn from(err: PhonebookError) -> Self {
        match err {
            PhonebookError::Validation
            | PhonebookError::DuplicateName
            | PhonebookError::DuplicateNumber
            | PhonebookError::MalformedId(_) => ApiError::BadRequest(err.to_string()),
            PhonebookError::NotFound => ApiError::NotFound(err.to_string()),
            PhonebookError::Store(store_err) => {
                let message = store_err.to_string();
                log_event_with_fields(
                    Event::RequestFailed,
                    &[("code", store_err.code()), ("message", message.as_str())],
                );
                ApiError::Internal
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Handler for unrouted paths and for methods a route does not serve
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(PhonebookError::Validation).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PhonebookError::NotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::UnknownEndpoint.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(PhonebookError::MalformedId("x".to_string())),
            ApiError::BadRequest("malformatted id".to_string())
        );
        assert_eq!(
            ApiError::from(PhonebookError::DuplicateName),
            ApiError::BadRequest("This name already exists".to_string())
        );
        assert_eq!(
            ApiError::from(PhonebookError::NotFound),
            ApiError::NotFound("Person not found".to_string())
        );
        assert_eq!(ApiError::UnknownEndpoint.to_string(), "unknown endpoint");
    }

    #[test]
    fn test_store_failures_hide_details() {
        let err = ApiError::from(PhonebookError::Store(StoreError::Unavailable(
            "Lock poisoned".to_string(),
        )));
        assert_eq!(err, ApiError::Internal);
        assert_eq!(err.to_string(), INTERNAL_ERROR_MESSAGE);
    }
}
