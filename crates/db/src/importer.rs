//! Bulk importer and search for the shared reference catalog.
//!
//! The catalog is loaded once from an external CSV stream. Re-triggering the
//! load against a populated catalog is a no-op: the importer counts existing
//! rows first and skips entirely when any are present, so downstream edits
//! survive an accidental re-run and the catalog can never be doubled. An
//! async mutex serializes concurrent load attempts within the process; the
//! count gate covers everything else.
//!
//! Per-process lifecycle:
//! `uninitialized -> importing -> {imported | skipped-nonempty | failed}`.

use serde::Serialize;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{info, warn};

use cellar_core::catalog::{clean_field, ColumnMap, DEFAULT_CATEGORY};

use crate::error::{ImportError, StoreError};
use crate::models::catalog::{CatalogEntry, NewCatalogEntry};
use crate::repositories::CatalogRepo;

/// Rows per insert transaction. Bounds memory and keeps a mid-import failure
/// from discarding everything already committed.
pub const IMPORT_BATCH_SIZE: usize = 1000;

/// Terminal state of one `bulk_load` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// The catalog was empty and the stream was imported.
    Imported,
    /// The catalog already had rows; nothing was touched.
    SkippedNonEmpty,
}

impl ImportOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::SkippedNonEmpty => "skipped_non_empty",
        }
    }
}

impl std::fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a completed (non-failed) bulk load.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    /// Rows inserted into the catalog by this invocation.
    pub imported: usize,
    /// Source rows dropped because they were malformed or had no name.
    pub skipped_rows: usize,
}

/// Owns the catalog's global import gate.
///
/// One instance per process; cloning the gate would defeat the
/// serialization, so the type is deliberately not `Clone`.
pub struct CatalogImporter {
    gate: Mutex<()>,
}

impl Default for CatalogImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogImporter {
    pub fn new() -> Self {
        Self { gate: Mutex::new(()) }
    }

    /// Idempotently populate the catalog from a CSV stream.
    ///
    /// Skips the whole import when the catalog already has rows. Otherwise
    /// parses the stream (header row, comma-delimited, quoted fields),
    /// resolves columns through the header alias table, and inserts in
    /// batches of [`IMPORT_BATCH_SIZE`], one transaction per batch.
    ///
    /// Malformed rows and rows without a usable name are skipped with a
    /// warning and counted in the report. An unreadable header aborts with
    /// zero imported; a batch failure aborts with the earlier batches kept,
    /// and the error reports how many rows were committed.
    pub async fn bulk_load<R: std::io::Read>(
        &self,
        pool: &SqlitePool,
        reader: R,
    ) -> Result<ImportReport, ImportError> {
        let _guard = self.gate.lock().await;

        let existing = CatalogRepo::count(pool)
            .await
            .map_err(|e| ImportError::Persistence { committed: 0, source: e })?;
        if existing > 0 {
            info!(existing, "catalog already populated, skipping import");
            return Ok(ImportReport {
                outcome: ImportOutcome::SkippedNonEmpty,
                imported: 0,
                skipped_rows: 0,
            });
        }

        self.load_stream(pool, reader).await
    }

    /// Explicit full reload: clear the catalog, then import unconditionally.
    ///
    /// This is the only mutation path for already-imported entries. Runs
    /// under the same gate as [`Self::bulk_load`].
    pub async fn reload<R: std::io::Read>(
        &self,
        pool: &SqlitePool,
        reader: R,
    ) -> Result<ImportReport, ImportError> {
        let _guard = self.gate.lock().await;

        let cleared = CatalogRepo::clear(pool)
            .await
            .map_err(|e| ImportError::Persistence { committed: 0, source: e })?;
        info!(cleared, "catalog cleared for full reload");

        self.load_stream(pool, reader).await
    }

    /// Case-insensitive substring search across all catalog fields.
    ///
    /// A record matches when any of name, category, wine, sub_type,
    /// producer, region, or country contains the query. A blank query
    /// returns the full catalog. Case folding is ASCII-only, per the
    /// backend's `lower()`.
    pub async fn search(
        pool: &SqlitePool,
        query: &str,
    ) -> Result<Vec<CatalogEntry>, StoreError> {
        Ok(CatalogRepo::search(pool, query).await?)
    }

    /// Full catalog dump.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<CatalogEntry>, StoreError> {
        Ok(CatalogRepo::list_all(pool).await?)
    }

    /// Parse and insert the stream. Caller must hold the gate and have
    /// decided that importing is appropriate.
    async fn load_stream<R: std::io::Read>(
        &self,
        pool: &SqlitePool,
        reader: R,
    ) -> Result<ImportReport, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        // An unreadable header is structural: abort with zero imported.
        let headers = csv_reader.headers()?.clone();
        let header_fields: Vec<&str> = headers.iter().collect();
        let columns = ColumnMap::resolve(&header_fields);

        let mut batch: Vec<NewCatalogEntry> = Vec::with_capacity(IMPORT_BATCH_SIZE);
        let mut imported = 0usize;
        let mut skipped_rows = 0usize;

        for result in csv_reader.records() {
            let record = match result {
                Ok(record) => record,
                // An I/O failure poisons the rest of the stream; a bad row
                // (broken UTF-8, stray quote) only poisons itself.
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(ImportError::Stream(e));
                }
                Err(e) => {
                    warn!(error = %e, "skipping malformed catalog row");
                    skipped_rows += 1;
                    continue;
                }
            };

            match entry_from_record(&columns, &record) {
                Some(entry) => batch.push(entry),
                None => {
                    warn!(line = record.position().map(|p| p.line()), "skipping catalog row with no name");
                    skipped_rows += 1;
                    continue;
                }
            }

            if batch.len() == IMPORT_BATCH_SIZE {
                flush_batch(pool, &mut batch, &mut imported).await?;
            }
        }
        flush_batch(pool, &mut batch, &mut imported).await?;

        info!(imported, skipped_rows, "catalog import complete");
        Ok(ImportReport {
            outcome: ImportOutcome::Imported,
            imported,
            skipped_rows,
        })
    }
}

/// Commit one batch in its own transaction and account for it.
async fn flush_batch(
    pool: &SqlitePool,
    batch: &mut Vec<NewCatalogEntry>,
    imported: &mut usize,
) -> Result<(), ImportError> {
    if batch.is_empty() {
        return Ok(());
    }
    CatalogRepo::insert_batch(pool, batch)
        .await
        .map_err(|e| ImportError::Persistence { committed: *imported, source: e })?;
    *imported += batch.len();
    batch.clear();
    Ok(())
}

/// Map one CSV record to a catalog entry through the resolved columns.
///
/// Returns `None` when the record has no usable name. A missing or blank
/// category falls back to the `"Other"` sentinel; the optional text fields
/// fall back to `NULL`.
fn entry_from_record(columns: &ColumnMap, record: &csv::StringRecord) -> Option<NewCatalogEntry> {
    let field = |idx: Option<usize>| clean_field(idx.and_then(|i| record.get(i)));

    let name = field(columns.name)?;
    let category = field(columns.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Some(NewCatalogEntry {
        name,
        category,
        wine: field(columns.wine),
        sub_type: field(columns.sub_type),
        producer: field(columns.producer),
        region: field(columns.region),
        country: field(columns.country),
    })
}
