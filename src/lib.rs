//! Client job-processing pipeline.
//!
//! Ingested client batches are validated against a country → calling-code
//! reference, classified by a credit-amount threshold, enriched with web
//! search results when high-value, and persisted.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `pipeline`: Validation, classification and orchestration.
//! - `search`: External search client.
//! - `storage`: Database storage operations.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod storage;
