use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

// ============ Database Models ============

/// A staged client record awaiting validation.
///
/// Created once by the ingestion layer and read-only from then on. The `id`
/// column of the staged table carries the job id the record was uploaded
/// under, so a batch is fetched with `WHERE id = $1`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ClientRecord {
    /// Job id this record was staged under.
    pub id: String,
    /// Client's full name.
    pub name: String,
    /// Raw phone number as uploaded; compared byte-for-byte against the
    /// country's calling code, no normalization.
    pub phone_number: String,
    /// Country name, the lookup key into the calling-code reference.
    pub country: String,
    pub gender: String,
    pub company: String,
    /// Already cleaned upstream; finite and non-negative.
    pub company_revenue: BigDecimal,
    /// Already cleaned upstream; finite and non-negative.
    pub credit_amount: BigDecimal,
}

/// Country name → calling-code reference, loaded fresh per job run and
/// read-only for the rest of the run.
pub type CallingCodeMap = HashMap<String, String>;

// ============ Search Models ============

/// One item from the external search collaborator. Only `link` is consumed
/// downstream; title and snippet are carried for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    pub link: String,
}

/// Wire shape of a search response. A missing `items` field means zero
/// results, not an error.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

// ============ API Models ============

/// Trigger payload for job processing.
#[derive(Debug, Deserialize)]
pub struct ProcessJobRequest {
    pub job_id: String,
}

/// Summary of a completed job run, returned as the success body.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job_id: String,
    /// Number of records fetched from staging.
    pub staged: usize,
    /// Number of records that survived phone-code validation.
    pub validated: usize,
    /// Number of clients that took the high-value (search) path.
    pub enriched: usize,
    /// Total enrichment links persisted across all clients.
    pub links_saved: usize,
}

