use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub search_base_url: String,
    pub search_api_key: String,
    pub search_engine_id: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            search_base_url: std::env::var("SEARCH_BASE_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/customsearch/v1".to_string()),
            search_api_key: std::env::var("SEARCH_API_KEY")
                .map_err(|_| anyhow::anyhow!("SEARCH_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("SEARCH_API_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            search_engine_id: std::env::var("SEARCH_ENGINE_ID")
                .map_err(|_| anyhow::anyhow!("SEARCH_ENGINE_ID environment variable required"))
                .and_then(|cx| {
                    if cx.trim().is_empty() {
                        anyhow::bail!("SEARCH_ENGINE_ID cannot be empty");
                    }
                    Ok(cx)
                })?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            &config.database_url[..20.min(config.database_url.len())]
        );
        tracing::debug!("Search base URL: {}", config.search_base_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
