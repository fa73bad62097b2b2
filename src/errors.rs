use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// Every variant is terminal to the current job run: there is no local
/// recovery or retry, and rows committed before the failing step stay
/// committed.
#[derive(Debug)]
pub enum AppError {
    /// Reference table or staged-record read failure.
    DataSource(sqlx::Error),
    /// No staged record survived validation; nothing was persisted.
    ValidationEmpty,
    /// External search call failed.
    Search(String),
    /// A verified-client or link write failed.
    Persistence(sqlx::Error),
    /// Bad request error (invalid trigger payload).
    BadRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DataSource(e) => write!(f, "Data source error: {}", e),
            AppError::ValidationEmpty => write!(f, "No valid clients found"),
            AppError::Search(msg) => write!(f, "Search error: {}", msg),
            AppError::Persistence(e) => write!(f, "Persistence error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Per-record detail (validation drops, per-step progress) lives in the
    /// logs, not in the response.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::DataSource(e) => {
                tracing::error!("Data source error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Data source error".to_string(),
                )
            }
            AppError::ValidationEmpty => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "No valid clients found".to_string(),
            ),
            AppError::Search(msg) => {
                tracing::error!("External search error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "External search error".to_string(),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Persistence error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// sqlx errors are mapped explicitly at call sites: a read failure is
// DataSource, a write failure is Persistence. No blanket From impl.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Search(err.to_string())
    }
}
