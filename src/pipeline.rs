//! Job processing pipeline: reference loading, phone-code validation,
//! threshold classification with search enrichment, and persistence.
//!
//! One job per invocation, processed sequentially and fail-fast. The first
//! error aborts the run; writes committed by earlier iterations are not
//! rolled back (the storage layer offers no cross-call transaction).

use crate::errors::AppError;
use crate::models::{CallingCodeMap, ClientRecord, JobReport};
use crate::search::SearchProvider;
use crate::storage::JobStore;
use bigdecimal::BigDecimal;

/// Credit-amount cutoff separating low- and high-value processing paths,
/// in the same (currency-agnostic) unit as `credit_amount`.
pub fn credit_threshold() -> BigDecimal {
    BigDecimal::from(2_000_000)
}

/// Whether a client takes the high-value (search enrichment) path.
/// The comparison is strict: a credit amount exactly at the threshold is
/// low-value.
pub fn is_high_value(client: &ClientRecord) -> bool {
    client.credit_amount > credit_threshold()
}

/// Filters staged records to those whose phone number exactly matches their
/// country's calling code.
///
/// A stable filter: survivors keep their input order. Records with an
/// unknown country or a mismatched number are dropped and logged, never
/// returned as errors.
pub fn validate_clients(clients: Vec<ClientRecord>, codes: &CallingCodeMap) -> Vec<ClientRecord> {
    let mut valid_clients = Vec::new();

    for client in clients {
        match codes.get(&client.country) {
            None => {
                tracing::warn!("No matching phone code for country {}", client.country);
            }
            Some(code) if client.phone_number == *code => {
                valid_clients.push(client);
            }
            Some(code) => {
                tracing::warn!(
                    "Phone number {} does not match country code {} for client {}",
                    client.phone_number,
                    code,
                    client.name
                );
            }
        }
    }

    tracing::info!("Number of valid clients: {}", valid_clients.len());
    valid_clients
}

/// Runs the full pipeline for one job id.
///
/// Steps, in order:
/// 1. Load the calling-code reference (fatal on read failure).
/// 2. Fetch staged records for the job id (fatal on read failure).
/// 3. Validate; an empty survivor set fails the job with `ValidationEmpty`
///    before anything is written.
/// 4. For each validated client in order: classify by credit threshold,
///    search-enrich high-value clients, persist the client, persist its
///    links. The first `Search` or `Persistence` error aborts the loop.
///
/// Success is reported only if every validated client completed all of its
/// writes. Re-running the same job id repeats all work and duplicates
/// output rows; idempotency is the caller's problem.
pub async fn run_job<S, P>(store: &S, search: &P, job_id: &str) -> Result<JobReport, AppError>
where
    S: JobStore,
    P: SearchProvider,
{
    tracing::info!("Processing job {}", job_id);

    let codes = store.load_calling_codes().await?;
    let staged = store.fetch_staged(job_id).await?;
    let staged_count = staged.len();
    tracing::info!("Fetched {} staged records for job {}", staged_count, job_id);

    let valid_clients = validate_clients(staged, &codes);
    if valid_clients.is_empty() {
        tracing::warn!("No valid clients found for job {}", job_id);
        return Err(AppError::ValidationEmpty);
    }

    let validated = valid_clients.len();
    let mut enriched = 0;
    let mut links_saved = 0;

    for client in &valid_clients {
        if is_high_value(client) {
            tracing::info!("Processing client {} with high credit amount", client.name);

            // Search first: a collaborator failure must abort before this
            // client writes anything.
            let items = search.search(&client.company, &client.country).await?;
            let urls: Vec<String> = items.into_iter().map(|item| item.link).collect();

            let client_id = store.save_client(job_id, client).await?;
            store.save_links(client_id, &client.name, &urls).await?;

            enriched += 1;
            links_saved += urls.len();
        } else {
            tracing::info!("Processing client {} with low credit amount", client.name);
            store.save_client(job_id, client).await?;
        }
    }

    tracing::info!("Job {} processed successfully", job_id);
    Ok(JobReport {
        job_id: job_id.to_string(),
        staged: staged_count,
        validated,
        enriched,
        links_saved,
    })
}
