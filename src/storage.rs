use crate::errors::AppError;
use crate::models::{CallingCodeMap, ClientRecord};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Seam between the pipeline and durable storage.
///
/// The orchestrator is generic over this trait so tests can substitute an
/// in-memory writer and observe exactly which writes were committed before a
/// failure. Each method is an independent statement; there is no enclosing
/// transaction across calls, so partially committed output survives a
/// mid-job abort.
pub trait JobStore {
    /// Loads the full country → calling-code reference into memory.
    /// Duplicate countries resolve last-seen-wins. Failure is fatal to the run.
    fn load_calling_codes(
        &self,
    ) -> impl std::future::Future<Output = Result<CallingCodeMap, AppError>> + Send;

    /// Fetches all staged records for a job id. An empty result is valid
    /// (zero records uploaded, or an unknown job id; the two are not
    /// distinguished).
    fn fetch_staged(
        &self,
        job_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ClientRecord>, AppError>> + Send;

    /// Inserts one verified-client row and returns its generated id.
    fn save_client(
        &self,
        job_id: &str,
        client: &ClientRecord,
    ) -> impl std::future::Future<Output = Result<Uuid, AppError>> + Send;

    /// Inserts one row per link for the given client. On a mid-sequence
    /// failure, links inserted before the failing one remain committed and
    /// the rest are not attempted.
    fn save_links(
        &self,
        client_id: Uuid,
        owner_name: &str,
        urls: &[String],
    ) -> impl std::future::Future<Output = Result<(), AppError>> + Send;
}

/// Postgres-backed storage for the job pipeline.
pub struct PgJobStorage {
    pool: PgPool,
}

impl PgJobStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl JobStore for PgJobStorage {
    async fn load_calling_codes(&self) -> Result<CallingCodeMap, AppError> {
        let rows = sqlx::query("SELECT country_name, phone_code FROM calling_codes")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DataSource)?;

        let mut codes = CallingCodeMap::with_capacity(rows.len());
        for row in rows {
            let country: String = row.try_get("country_name").map_err(AppError::DataSource)?;
            let code: String = row.try_get("phone_code").map_err(AppError::DataSource)?;
            codes.insert(country, code);
        }

        tracing::debug!("Loaded {} calling codes", codes.len());
        Ok(codes)
    }

    async fn fetch_staged(&self, job_id: &str) -> Result<Vec<ClientRecord>, AppError> {
        let clients = sqlx::query_as::<_, ClientRecord>(
            "SELECT id, name, phone_number, country, gender, company, company_revenue, credit_amount
             FROM clients WHERE id = $1",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DataSource)?;

        Ok(clients)
    }

    async fn save_client(&self, job_id: &str, client: &ClientRecord) -> Result<Uuid, AppError> {
        // Staged rows reuse the job id as their id column; verified rows get
        // a fresh UUID so re-runs and same-named clients never collide on the
        // primary key.
        let client_id = Uuid::new_v4();

        let result = sqlx::query(
            "INSERT INTO verified_clients
               (id, job_id, name, phone_number, country, gender, company, company_revenue, credit_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(client_id)
        .bind(job_id)
        .bind(&client.name)
        .bind(&client.phone_number)
        .bind(&client.country)
        .bind(&client.gender)
        .bind(&client.company)
        .bind(&client.company_revenue)
        .bind(&client.credit_amount)
        .execute(&self.pool)
        .await
        .map_err(AppError::Persistence)?;

        tracing::info!(
            "Inserted verified client {} ({}), rows affected: {}",
            client.name,
            client_id,
            result.rows_affected()
        );
        Ok(client_id)
    }

    async fn save_links(
        &self,
        client_id: Uuid,
        owner_name: &str,
        urls: &[String],
    ) -> Result<(), AppError> {
        for url in urls {
            sqlx::query("INSERT INTO links (client_id, name, url) VALUES ($1, $2, $3)")
                .bind(client_id)
                .bind(owner_name)
                .bind(url)
                .execute(&self.pool)
                .await
                .map_err(AppError::Persistence)?;
        }

        tracing::info!("Inserted {} links for client {}", urls.len(), owner_name);
        Ok(())
    }
}
