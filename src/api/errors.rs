use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::student::{FieldError, StudentError};

/// Message returned for every unexpected failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error. Please contact support.";

/// One entry of a 422 response body
///
/// `loc` is the path to the offending input, starting with where it came
/// from (`body`, `query`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationDetail {
    pub fn new(loc: Vec<String>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Converts a domain field error located in the request body
    pub fn from_body_field(error: &FieldError) -> Self {
        let loc = std::iter::once("body".to_string())
            .chain(error.field.split('.').map(str::to_string))
            .collect();
        Self::new(loc, error.message.clone(), error.kind)
    }
}

/// API error type with HTTP status code and a `detail` payload
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: Value,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, detail: impl Into<Value>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Value::String(message.into()))
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, Value::String(message.into()))
    }

    /// Creates a 422 Unprocessable Entity error with per-field detail
    pub fn validation(details: Vec<ValidationDetail>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, json!(details))
    }

    /// Creates a 429 Too Many Requests error
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, Value::String(message.into()))
    }

    /// Creates a 500 Internal Server Error
    ///
    /// The message is logged and never sent to the client.
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        tracing::error!(error = %message, "Unhandled error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "detail": self.detail
        }));

        (self.status, body).into_response()
    }
}

impl From<StudentError> for ApiError {
    fn from(error: StudentError) -> Self {
        match error {
            StudentError::Validation(errors) => {
                Self::validation(errors.iter().map(ValidationDetail::from_body_field).collect())
            }
            StudentError::InvalidIdentifier(_) => Self::bad_request("Invalid ID format"),
            StudentError::NotFound(_) => Self::not_found("Student not found"),
            StudentError::Storage(message) => Self::internal_server_error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_422_with_body_location() {
        let error: ApiError = StudentError::Validation(vec![FieldError::new(
            "address.city",
            "Field required",
            "missing",
        )])
        .into();

        assert_eq!(error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error.detail,
            json!([{ "loc": ["body", "address", "city"], "msg": "Field required", "type": "missing" }])
        );
    }

    #[test]
    fn invalid_identifier_maps_to_400() {
        let error: ApiError = StudentError::InvalidIdentifier("abc".to_string()).into();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.detail, json!("Invalid ID format"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let error: ApiError = StudentError::NotFound("x".to_string()).into();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
        assert_eq!(error.detail, json!("Student not found"));
    }

    #[test]
    fn storage_errors_are_hidden_from_clients() {
        let error: ApiError = StudentError::Storage("socket closed at 10.0.0.3".to_string()).into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail, json!(INTERNAL_ERROR_MESSAGE));
    }
}
