//! The inventory store: the transport-agnostic service surface for private
//! bottle records.
//!
//! Sits on top of [`BottleRepo`] and adds the two concerns the repository
//! deliberately leaves out: field validation (rejected before any SQL runs)
//! and write-path failure logging. Log events carry the operation, id, and
//! owner only — never field payloads, which may contain personal notes.
//!
//! Concurrency contract: updates are last-writer-wins per field-set. Each
//! patch is applied as one atomic statement, so two concurrent patches to
//! disjoint fields both land, and two patches to the same field resolve to
//! whichever statement the backend ran second.

use sqlx::SqlitePool;
use tracing::error;

use cellar_core::types::DbId;
use cellar_core::validation;

use crate::error::StoreError;
use crate::models::bottle::{Bottle, CreateBottle, UpdateBottle};
use crate::repositories::BottleRepo;

/// CRUD over private bottle records, always scoped to an owner id.
pub struct InventoryStore;

impl InventoryStore {
    /// List all bottles owned by `owner_id`, in insertion order.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        owner_id: &str,
    ) -> Result<Vec<Bottle>, StoreError> {
        Ok(BottleRepo::list_by_owner(pool, owner_id).await?)
    }

    /// List bottles owned by `owner_id` with an exact category match.
    pub async fn list_by_owner_and_category(
        pool: &SqlitePool,
        owner_id: &str,
        category: &str,
    ) -> Result<Vec<Bottle>, StoreError> {
        Ok(BottleRepo::list_by_owner_and_category(pool, owner_id, category).await?)
    }

    /// Fetch a single bottle by id, scoped to `owner_id`.
    ///
    /// `Ok(None)` covers both "no such row" and "owned by someone else";
    /// callers cannot distinguish the two.
    pub async fn get_by_id(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
    ) -> Result<Option<Bottle>, StoreError> {
        Ok(BottleRepo::find_by_id(pool, id, owner_id).await?)
    }

    /// Validate and insert a new bottle for `owner_id`.
    pub async fn create(
        pool: &SqlitePool,
        owner_id: &str,
        input: &CreateBottle,
    ) -> Result<Bottle, StoreError> {
        validation::validate_name(&input.name)?;
        validation::validate_category(&input.category)?;
        if let Some(rating) = input.rating {
            validation::validate_rating(rating)?;
        }
        if let Some(stock) = input.stock_level {
            validation::validate_stock_level(stock)?;
        }
        if let Some(vintages) = &input.vintage_stocks {
            for vs in vintages {
                validation::validate_vintage_stock(vs.vintage, vs.stock)?;
            }
        }

        BottleRepo::create(pool, owner_id, input).await.map_err(|e| {
            error!(op = "create", owner = %owner_id, error = %e, "bottle insert failed");
            StoreError::from(e)
        })
    }

    /// Validate and apply a partial update to a bottle.
    ///
    /// Absent fields are left unchanged; present fields overwrite, including
    /// explicit clears of nullable fields. An all-absent patch succeeds and
    /// returns the stored row untouched. `Ok(None)` means no row with this
    /// id+owner pair exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
        input: &UpdateBottle,
    ) -> Result<Option<Bottle>, StoreError> {
        if let Some(name) = &input.name {
            validation::validate_name(name)?;
        }
        if let Some(category) = &input.category {
            validation::validate_category(category)?;
        }
        if let Some(Some(rating)) = input.rating {
            validation::validate_rating(rating)?;
        }
        if let Some(stock) = input.stock_level {
            validation::validate_stock_level(stock)?;
        }
        if let Some(vintages) = &input.vintage_stocks {
            for vs in vintages {
                validation::validate_vintage_stock(vs.vintage, vs.stock)?;
            }
        }

        BottleRepo::update(pool, id, owner_id, input)
            .await
            .map_err(|e| {
                error!(op = "update", id, owner = %owner_id, error = %e, "bottle update failed");
                StoreError::from(e)
            })
    }

    /// Delete a bottle, scoped to `owner_id`.
    ///
    /// `Ok(false)` (nothing matched) is a normal outcome, not an error.
    pub async fn delete(
        pool: &SqlitePool,
        id: DbId,
        owner_id: &str,
    ) -> Result<bool, StoreError> {
        BottleRepo::delete(pool, id, owner_id).await.map_err(|e| {
            error!(op = "delete", id, owner = %owner_id, error = %e, "bottle delete failed");
            StoreError::from(e)
        })
    }
}
