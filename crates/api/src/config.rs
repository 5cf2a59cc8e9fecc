use beatsmith_core::entity_creator::{SlugRetryPolicy, DEFAULT_SLUG_MAX_RETRIES};
use beatsmith_core::slug_resolver::IterationOrder;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on closing the database pool at shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Slug conflict handling shared by logline and story plan creation.
    pub slug_policy: SlugRetryPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `SLUG_MAX_RETRIES`      | `1`                        |
    /// | `SLUG_ITERATION_ORDER`  | `latest_created`           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_retries: u32 = std::env::var("SLUG_MAX_RETRIES")
            .unwrap_or_else(|_| DEFAULT_SLUG_MAX_RETRIES.to_string())
            .parse()
            .expect("SLUG_MAX_RETRIES must be a valid u32");

        let order: IterationOrder = std::env::var("SLUG_ITERATION_ORDER")
            .unwrap_or_else(|_| IterationOrder::default().to_string())
            .parse()
            .unwrap_or_else(|e| panic!("SLUG_ITERATION_ORDER is invalid: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            slug_policy: SlugRetryPolicy { max_retries, order },
        }
    }
}
