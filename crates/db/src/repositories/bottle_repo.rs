//! Repository for the `bottles` table.
//!
//! Every query is scoped by `owner_id` in the SQL itself, so a caller can
//! never observe or touch another user's rows regardless of what the layers
//! above do. Partial updates are a single conditional `UPDATE ... RETURNING`
//! statement: no read-modify-write round trip, no delete+reinsert, so a
//! concurrent writer can never be partially merged over and `id`/`created_at`
//! are stable by construction.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use cellar_core::types::DbId;

use crate::models::bottle::{Bottle, CreateBottle, UpdateBottle, VintageStock};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, category, wine, sub_type, producer, \
    region, country, stock_level, vintage_stocks, image_ref, rating, notes, created_at";

/// Provides CRUD operations for bottles, always scoped to an owner.
pub struct BottleRepo;

impl BottleRepo {
    /// Insert a new bottle for `owner_id`, returning the created row.
    ///
    /// `stock_level` defaults to 0 and `vintage_stocks` to `[]` when omitted.
    /// The id and `created_at` are assigned here.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: &str,
        input: &CreateBottle,
    ) -> Result<Bottle, sqlx::Error> {
        let vintage_stocks = Json(input.vintage_stocks.clone().unwrap_or_default());
        let query = format!(
            "INSERT INTO bottles
                (owner_id, name, category, wine, sub_type, producer, region, country,
                 stock_level, vintage_stocks, image_ref, rating, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, COALESCE(?, 0), ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.wine)
            .bind(&input.sub_type)
            .bind(&input.producer)
            .bind(&input.region)
            .bind(&input.country)
            .bind(input.stock_level)
            .bind(vintage_stocks)
            .bind(&input.image_ref)
            .bind(input.rating)
            .bind(&input.notes)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a bottle by id, scoped to its owner.
    ///
    /// Returns `None` both when no such row exists and when the row belongs
    /// to a different owner; the two cases are indistinguishable to the
    /// caller.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
    ) -> Result<Option<Bottle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bottles WHERE id = ? AND owner_id = ?");
        sqlx::query_as::<_, Bottle>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all bottles for an owner, in insertion order.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: &str,
    ) -> Result<Vec<Bottle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bottles WHERE owner_id = ? ORDER BY id ASC");
        sqlx::query_as::<_, Bottle>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List an owner's bottles filtered by exact category match.
    pub async fn list_by_owner_and_category(
        pool: &SqlitePool,
        owner_id: &str,
        category: &str,
    ) -> Result<Vec<Bottle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bottles
             WHERE owner_id = ? AND category = ?
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(owner_id)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Partially update a bottle in one atomic conditional statement.
    ///
    /// Required columns use `COALESCE` (absent field keeps the stored value);
    /// nullable columns use `CASE WHEN provided THEN value ELSE column END`
    /// so a patch can set them to NULL. An all-absent patch degenerates to
    /// `SET col = col` for every column and returns the row unchanged.
    ///
    /// Returns `None` if no row with the given id+owner pair exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
        input: &UpdateBottle,
    ) -> Result<Option<Bottle>, sqlx::Error> {
        let vintage_stocks: Option<Json<Vec<VintageStock>>> =
            input.vintage_stocks.clone().map(Json);

        let query = format!(
            "UPDATE bottles SET
                name           = COALESCE(?, name),
                category       = COALESCE(?, category),
                wine           = CASE WHEN ? THEN ? ELSE wine END,
                sub_type       = CASE WHEN ? THEN ? ELSE sub_type END,
                producer       = CASE WHEN ? THEN ? ELSE producer END,
                region         = CASE WHEN ? THEN ? ELSE region END,
                country        = CASE WHEN ? THEN ? ELSE country END,
                stock_level    = COALESCE(?, stock_level),
                vintage_stocks = COALESCE(?, vintage_stocks),
                image_ref      = CASE WHEN ? THEN ? ELSE image_ref END,
                rating         = CASE WHEN ? THEN ? ELSE rating END,
                notes          = CASE WHEN ? THEN ? ELSE notes END
             WHERE id = ? AND owner_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bottle>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.wine.is_some())
            .bind(input.wine.as_ref().and_then(|v| v.as_deref()))
            .bind(input.sub_type.is_some())
            .bind(input.sub_type.as_ref().and_then(|v| v.as_deref()))
            .bind(input.producer.is_some())
            .bind(input.producer.as_ref().and_then(|v| v.as_deref()))
            .bind(input.region.is_some())
            .bind(input.region.as_ref().and_then(|v| v.as_deref()))
            .bind(input.country.is_some())
            .bind(input.country.as_ref().and_then(|v| v.as_deref()))
            .bind(input.stock_level)
            .bind(vintage_stocks)
            .bind(input.image_ref.is_some())
            .bind(input.image_ref.as_ref().and_then(|v| v.as_deref()))
            .bind(input.rating.is_some())
            .bind(input.rating.and_then(|v| v))
            .bind(input.notes.is_some())
            .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a bottle, scoped to its owner.
    ///
    /// Returns `true` iff a row was removed; `false` when nothing matched.
    pub async fn delete(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bottles WHERE id = ? AND owner_id = ?")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
