//! Database configuration loaded from environment variables.

use std::time::Duration;

/// Pool configuration.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite connection URL (default: `sqlite://cellar.db`).
    pub database_url: String,
    /// Maximum pool size (default: `5`).
    pub max_connections: u32,
    /// Bound on waiting for a connection; a timeout surfaces as a
    /// persistence error, never an automatic retry (default: `30`).
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://cellar.db".into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default             |
    /// |----------------------------|---------------------|
    /// | `DATABASE_URL`             | `sqlite://cellar.db`|
    /// | `DB_MAX_CONNECTIONS`       | `5`                 |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`  | `30`                |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| defaults.max_connections.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.acquire_timeout.as_secs().to_string())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        }
    }
}
