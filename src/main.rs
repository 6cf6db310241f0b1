use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

use student_records_api::api::{self, middleware::RateLimiter};
use student_records_api::config::{AppConfig, ConfigError};
use student_records_api::infrastructure::repositories::MongoStudentRepository;
use student_records_api::services::StudentService;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Database(String),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Connect to database
    tracing::info!("Connecting to MongoDB...");
    let repository = MongoStudentRepository::connect(&config.mongo_uri, &config.database_name)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to MongoDB");
            StartupError::Database(e)
        })?;

    tracing::info!("Connected to MongoDB successfully");

    let service = StudentService::new(Arc::new(repository));
    let rate_limiter = Arc::new(RateLimiter::per_minute(config.rate_limit_per_minute));
    let app = api::app(service, rate_limiter);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
