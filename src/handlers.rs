use crate::config::Config;
use crate::errors::AppError;
use crate::models::{JobReport, ProcessJobRequest};
use crate::pipeline::run_job;
use crate::search::SearchService;
use crate::storage::PgJobStorage;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Application configuration.
    pub config: Config,
    /// Client for the external search API.
    pub search: SearchService,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Triggers processing of one staged job.
///
/// Invoked by the ingestion layer once all staged rows for the job id have
/// been written. The call is synchronous: it returns only after the job has
/// run to completion or hit its first failure.
pub async fn process_job(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProcessJobRequest>,
) -> Result<Json<JobReport>, AppError> {
    if payload.job_id.trim().is_empty() {
        return Err(AppError::BadRequest("Missing job_id".to_string()));
    }

    let storage = PgJobStorage::new(state.db.clone());
    let report = run_job(&storage, &state.search, &payload.job_id).await?;

    Ok(Json(report))
}
