//! Error taxonomy for the persistence layer.
//!
//! Not-found is never an error here: lookups return `Ok(None)` and deletes
//! return `Ok(false)`. The variants below cover the two genuine failure
//! classes, each with a stable machine-readable kind.

use cellar_core::error::ValidationError;

/// Failure of an inventory store or catalog read/write operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Caller-supplied data violates a field constraint. Never retried.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend rejected or failed the operation. Surfaced opaquely;
    /// retry policy, if any, belongs to the caller.
    #[error("database error: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl StoreError {
    /// Stable machine-readable kind for transport layers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

/// Failure of a catalog bulk load.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The record stream itself could not be read (unreadable header,
    /// broken source). Nothing was imported.
    #[error("failed to read catalog stream: {0}")]
    Stream(#[from] csv::Error),

    /// A batch insert failed after `committed` rows had already landed in
    /// earlier batches. The failing batch was rolled back.
    #[error("import aborted after committing {committed} rows: {source}")]
    Persistence {
        committed: usize,
        #[source]
        source: sqlx::Error,
    },
}

impl ImportError {
    /// Rows that made it into the catalog before the failure.
    pub fn committed(&self) -> usize {
        match self {
            Self::Stream(_) => 0,
            Self::Persistence { committed, .. } => *committed,
        }
    }
}
