mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod pipeline;
mod search;
mod storage;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::search::SearchService;

/// Main entry point for the application.
///
/// Initializes logging, configuration, the database pool and the search
/// client, then serves the job-processing API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_jobs_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await?;
    tracing::info!("Database connection pool established");

    // Initialize external search client
    let search = SearchService::new(&config);
    tracing::info!("Search client initialized: {}", config.search_base_url);

    // Build application state
    let app_state = std::sync::Arc::new(handlers::AppState {
        db: db.pool.clone(),
        config: config.clone(),
        search,
    });

    let api_routes = Router::new()
        .route("/api/v1/jobs/process", post(handlers::process_job))
        .layer(
            // Request size limit: 1MB max payload (the trigger body is a single job id)
            ServiceBuilder::new().layer(RequestBodyLimitLayer::new(1024 * 1024)),
        );

    // Health check bypasses the body limit
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
