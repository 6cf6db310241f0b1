use axum::Json;
use serde_json::{json, Value};

use crate::api::errors::ApiError;

/// Welcome payload
///
/// GET /
pub async fn read_root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Backend Intern Hiring Task API!" }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
