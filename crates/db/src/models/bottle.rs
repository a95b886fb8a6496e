//! Bottle models and DTOs.
//!
//! `Bottle` is the database row; `CreateBottle` and `UpdateBottle` are the
//! request payloads. Update fields that are nullable in the row use
//! `Option<Option<T>>` so a patch can distinguish "leave unchanged" (outer
//! `None`) from "clear the value" (`Some(None)`).

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use cellar_core::types::{DbId, Timestamp};

/// One (vintage year, bottle count) pair.
///
/// Stored inside the `vintage_stocks` JSON array in list order. Duplicate
/// vintages are retained as separate entries, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VintageStock {
    pub vintage: i64,
    pub stock: i64,
}

/// A row from the `bottles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bottle {
    pub id: DbId,
    pub owner_id: String,
    pub name: String,
    pub category: String,
    pub wine: Option<String>,
    pub sub_type: Option<String>,
    pub producer: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub stock_level: i64,
    pub vintage_stocks: Json<Vec<VintageStock>>,
    pub image_ref: Option<String>,
    pub rating: Option<i64>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new bottle.
///
/// `stock_level` defaults to 0 and `vintage_stocks` to an empty list when
/// omitted. The owner id is not part of the payload; it is supplied by the
/// caller's identity and passed separately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBottle {
    pub name: String,
    pub category: String,
    pub wine: Option<String>,
    pub sub_type: Option<String>,
    pub producer: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub stock_level: Option<i64>,
    pub vintage_stocks: Option<Vec<VintageStock>>,
    pub image_ref: Option<String>,
    pub rating: Option<i64>,
    pub notes: Option<String>,
}

/// DTO for partially updating a bottle.
///
/// An all-`None` patch is a valid no-op: the update still succeeds and
/// returns the stored row unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBottle {
    pub name: Option<String>,
    pub category: Option<String>,
    pub wine: Option<Option<String>>,
    pub sub_type: Option<Option<String>>,
    pub producer: Option<Option<String>>,
    pub region: Option<Option<String>>,
    pub country: Option<Option<String>>,
    pub stock_level: Option<i64>,
    pub vintage_stocks: Option<Vec<VintageStock>>,
    pub image_ref: Option<Option<String>>,
    pub rating: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
}
