//! Persistence layer for the cellar inventory tracker.
//!
//! Two independent components over one SQLite backend:
//! [`store::InventoryStore`] for private per-user bottle records, and
//! [`importer::CatalogImporter`] for the shared reference catalog.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod config;
pub mod error;
pub mod importer;
pub mod models;
pub mod repositories;
pub mod store;

pub use config::DbConfig;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from the given configuration.
///
/// Opens the database in WAL mode with foreign keys on, creating the file
/// if it does not exist.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Apply all pending migrations.
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Cheap liveness probe for the backend.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
