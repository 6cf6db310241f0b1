// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod schemas;

use axum::{
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::StudentService;
use errors::ApiError;
use handlers::{root, students};
use middleware::{rate_limit, RateLimiter};

/// Builds the student routes, each guarded by the rate limiter
pub fn student_routes(rate_limiter: Arc<RateLimiter>) -> Router<StudentService> {
    Router::new()
        .route(
            "/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/students/:id",
            get(students::fetch_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route_layer(from_fn_with_state(rate_limiter, rate_limit))
}

/// Builds the complete application
///
/// Registers permissive CORS, request tracing, the panic handler, the root
/// routes and the rate-limited student routes.
pub fn app(service: StudentService, rate_limiter: Arc<RateLimiter>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(root::read_root))
        .route("/health", get(root::health_check))
        .merge(student_routes(rate_limiter))
        .fallback(root::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Converts a handler panic into the generic 500 response
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    ApiError::internal_server_error(format!("Handler panicked: {}", message)).into_response()
}
