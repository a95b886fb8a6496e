//! Catalog models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use cellar_core::types::DbId;

/// A row from the `catalog_entries` table.
///
/// Shared reference data; immutable once imported except via a full reload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub wine: Option<String>,
    pub sub_type: Option<String>,
    pub producer: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// DTO for inserting a catalog entry during bulk load.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCatalogEntry {
    pub name: String,
    pub category: String,
    pub wine: Option<String>,
    pub sub_type: Option<String>,
    pub producer: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}
