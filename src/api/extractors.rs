use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::errors::{ApiError, ValidationDetail};
use crate::domain::student::StudentId;

/// JSON body extractor whose rejections are 422 validation errors
///
/// Usage:
/// ```rust,ignore
/// async fn handler(JsonBody(body): JsonBody<CreateStudentSchema>) { /* ... */ }
/// ```
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        let body = serde_path_to_error::deserialize(value).map_err(data_error)?;
        Ok(JsonBody(body))
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    let kind = match &rejection {
        JsonRejection::MissingJsonContentType(_) => "missing_content_type",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::JsonDataError(_) => "value_error",
        _ => "body_unreadable",
    };
    ApiError::validation(vec![ValidationDetail::new(
        vec!["body".to_string()],
        rejection.body_text(),
        kind,
    )])
}

/// Locates a body that parsed as JSON but does not fit the schema
fn data_error(error: serde_path_to_error::Error<serde_json::Error>) -> ApiError {
    let mut loc = vec!["body".to_string()];
    loc.extend(error.path().iter().map(|segment| segment.to_string()));

    let message = error.inner().to_string();
    let detail = match missing_field(&message) {
        Some(field) => {
            loc.push(field.to_string());
            ValidationDetail::new(loc, "Field required", "missing")
        }
        None if message.starts_with("invalid type") => {
            ValidationDetail::new(loc, message, "invalid_type")
        }
        None => ValidationDetail::new(loc, message, "value_error"),
    };
    ApiError::validation(vec![detail])
}

fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
}

/// Query string extractor whose rejections are 422 validation errors
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(QueryParams(value))
    }
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::validation(vec![ValidationDetail::new(
        vec!["query".to_string()],
        rejection.body_text(),
        "value_error",
    )])
}

/// Path extractor for `/students/:id`
///
/// Runs before any body extractor, so a malformed id is rejected with 400
/// regardless of the body.
#[derive(Debug)]
pub struct StudentIdPath(pub StudentId);

#[async_trait]
impl<S> FromRequestParts<S> for StudentIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        Ok(StudentIdPath(StudentId::parse(&raw)?))
    }
}
