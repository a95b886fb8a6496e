//! Repository for the `catalog_entries` table.

use sqlx::SqlitePool;

use crate::models::catalog::{CatalogEntry, NewCatalogEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, wine, sub_type, producer, region, country";

/// Provides data access for the shared reference catalog.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Count all catalog rows. The importer's idempotency gate.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM catalog_entries")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert a batch of entries inside a single transaction.
    ///
    /// Either the whole batch commits or none of it does; a failure rolls
    /// back every row of the batch.
    pub async fn insert_batch(
        pool: &SqlitePool,
        entries: &[NewCatalogEntry],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for entry in entries {
            sqlx::query(
                "INSERT INTO catalog_entries
                    (name, category, wine, sub_type, producer, region, country)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&entry.name)
            .bind(&entry.category)
            .bind(&entry.wine)
            .bind(&entry.sub_type)
            .bind(&entry.producer)
            .bind(&entry.region)
            .bind(&entry.country)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }

    /// List the full catalog.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM catalog_entries ORDER BY id ASC");
        sqlx::query_as::<_, CatalogEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search across all descriptive columns.
    ///
    /// The query text is always a bound parameter, with `LIKE` wildcards
    /// escaped, so user input is matched literally and can never change the
    /// statement shape. A blank query falls back to [`Self::list_all`].
    ///
    /// Case folding is ASCII-only on both sides, matching SQLite's
    /// `lower()`: non-ASCII characters (accented names like "Château")
    /// match only in their stored case.
    pub async fn search(
        pool: &SqlitePool,
        query_text: &str,
    ) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let trimmed = query_text.trim();
        if trimmed.is_empty() {
            return Self::list_all(pool).await;
        }

        let pattern = format!("%{}%", escape_like(&trimmed.to_ascii_lowercase()));
        let query = format!(
            "SELECT {COLUMNS} FROM catalog_entries
             WHERE lower(name)     LIKE ? ESCAPE '\\'
                OR lower(category) LIKE ? ESCAPE '\\'
                OR lower(wine)     LIKE ? ESCAPE '\\'
                OR lower(sub_type) LIKE ? ESCAPE '\\'
                OR lower(producer) LIKE ? ESCAPE '\\'
                OR lower(region)   LIKE ? ESCAPE '\\'
                OR lower(country)  LIKE ? ESCAPE '\\'
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Delete every catalog row. Used by the explicit full-reload path.
    pub async fn clear(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalog_entries")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Escape `LIKE` metacharacters so the query text matches literally.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
