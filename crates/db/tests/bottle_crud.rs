//! Integration tests for the inventory store.
//!
//! Exercises the full store + repository stack against a real database:
//! - Create / get / list with owner scoping
//! - Partial-update merge semantics, including explicit clears and the
//!   empty-patch no-op
//! - Validation rejection before storage
//! - Delete semantics and the end-to-end ownership scenario

use assert_matches::assert_matches;
use sqlx::SqlitePool;

use cellar_core::error::ValidationError;
use cellar_db::error::StoreError;
use cellar_db::models::bottle::{CreateBottle, UpdateBottle, VintageStock};
use cellar_db::store::InventoryStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_bottle(name: &str, category: &str) -> CreateBottle {
    CreateBottle {
        name: name.to_string(),
        category: category.to_string(),
        ..CreateBottle::default()
    }
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_assigns_id_owner_and_defaults(pool: SqlitePool) {
    let a = InventoryStore::create(&pool, "u1", &new_bottle("Barolo", "Red"))
        .await
        .unwrap();
    let b = InventoryStore::create(&pool, "u1", &new_bottle("Chablis", "White"))
        .await
        .unwrap();

    assert_ne!(a.id, b.id);
    assert!(b.id > a.id, "ids should be monotonic");
    assert_eq!(a.owner_id, "u1");
    assert_eq!(a.name, "Barolo");
    assert_eq!(a.category, "Red");
    assert_eq!(a.stock_level, 0);
    assert!(a.vintage_stocks.0.is_empty());
    assert_eq!(a.rating, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_preserves_duplicate_vintages_in_order(pool: SqlitePool) {
    let input = CreateBottle {
        vintage_stocks: Some(vec![
            VintageStock { vintage: 2018, stock: 2 },
            VintageStock { vintage: 2016, stock: 1 },
            VintageStock { vintage: 2018, stock: 4 },
        ]),
        ..new_bottle("Brunello", "Red")
    };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();

    // Duplicates are retained as separate entries, never merged.
    assert_eq!(
        bottle.vintage_stocks.0,
        vec![
            VintageStock { vintage: 2018, stock: 2 },
            VintageStock { vintage: 2016, stock: 1 },
            VintageStock { vintage: 2018, stock: 4 },
        ]
    );
}

// ---------------------------------------------------------------------------
// Test: validation (rejected before storage)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_rejects_invalid_fields(pool: SqlitePool) {
    let err = InventoryStore::create(&pool, "u1", &new_bottle("   ", "Red"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::EmptyName));

    let err = InventoryStore::create(&pool, "u1", &new_bottle("Ok", "Orange"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::UnknownCategory(_)));

    let input = CreateBottle { rating: Some(6), ..new_bottle("Ok", "Red") };
    let err = InventoryStore::create(&pool, "u1", &input).await.unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::RatingOutOfRange { value: 6, .. }));

    let input = CreateBottle { stock_level: Some(-1), ..new_bottle("Ok", "Red") };
    let err = InventoryStore::create(&pool, "u1", &input).await.unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::NegativeStock(-1)));

    let input = CreateBottle {
        vintage_stocks: Some(vec![VintageStock { vintage: 1899, stock: 1 }]),
        ..new_bottle("Ok", "Red")
    };
    let err = InventoryStore::create(&pool, "u1", &input).await.unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::VintageOutOfRange { value: 1899, .. }));

    // Nothing reached storage.
    assert!(InventoryStore::list_by_owner(&pool, "u1").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_rejects_invalid_fields(pool: SqlitePool) {
    let bottle = InventoryStore::create(&pool, "u1", &new_bottle("Barolo", "Red"))
        .await
        .unwrap();

    let patch = UpdateBottle { name: Some("".to_string()), ..UpdateBottle::default() };
    let err = InventoryStore::update(&pool, bottle.id, "u1", &patch).await.unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::EmptyName));

    let patch = UpdateBottle { rating: Some(Some(0)), ..UpdateBottle::default() };
    let err = InventoryStore::update(&pool, bottle.id, "u1", &patch).await.unwrap_err();
    assert_matches!(err, StoreError::Validation(ValidationError::RatingOutOfRange { value: 0, .. }));

    // The record is untouched after the rejected patches.
    let current = InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().unwrap();
    assert_eq!(current.name, "Barolo");
    assert_eq!(current.rating, None);
}

// ---------------------------------------------------------------------------
// Test: owner scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_get_by_id_hides_other_owners_rows(pool: SqlitePool) {
    let bottle = InventoryStore::create(&pool, "alice", &new_bottle("Barolo", "Red"))
        .await
        .unwrap();

    // Wrong owner and nonexistent id are indistinguishable.
    assert!(InventoryStore::get_by_id(&pool, bottle.id, "bob").await.unwrap().is_none());
    assert!(InventoryStore::get_by_id(&pool, bottle.id + 999, "alice").await.unwrap().is_none());
    assert!(InventoryStore::get_by_id(&pool, bottle.id, "alice").await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_is_scoped_and_in_insertion_order(pool: SqlitePool) {
    InventoryStore::create(&pool, "u1", &new_bottle("First", "Red")).await.unwrap();
    InventoryStore::create(&pool, "u2", &new_bottle("Theirs", "Red")).await.unwrap();
    InventoryStore::create(&pool, "u1", &new_bottle("Second", "White")).await.unwrap();

    let mine = InventoryStore::list_by_owner(&pool, "u1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].name, "First");
    assert_eq!(mine[1].name, "Second");

    let reds = InventoryStore::list_by_owner_and_category(&pool, "u1", "Red")
        .await
        .unwrap();
    assert_eq!(reds.len(), 1);
    assert_eq!(reds[0].name, "First");
}

// ---------------------------------------------------------------------------
// Test: partial update merge semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_merges_only_present_fields(pool: SqlitePool) {
    let input = CreateBottle { rating: Some(3), ..new_bottle("X", "Red") };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();

    let patch = UpdateBottle { rating: Some(Some(5)), ..UpdateBottle::default() };
    let updated = InventoryStore::update(&pool, bottle.id, "u1", &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "X");
    assert_eq!(updated.rating, Some(5));
    assert_eq!(updated.created_at, bottle.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_distinguishes_absent_from_explicit_clear(pool: SqlitePool) {
    let input = CreateBottle {
        notes: Some("drink before 2030".to_string()),
        rating: Some(4),
        ..new_bottle("Rioja", "Red")
    };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();

    // Absent notes field: untouched. Explicit null rating: cleared.
    let patch = UpdateBottle { rating: Some(None), ..UpdateBottle::default() };
    let updated = InventoryStore::update(&pool, bottle.id, "u1", &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.rating, None);
    assert_eq!(updated.notes.as_deref(), Some("drink before 2030"));

    // Explicit empty string overwrites with the empty string.
    let patch = UpdateBottle {
        notes: Some(Some("".to_string())),
        ..UpdateBottle::default()
    };
    let updated = InventoryStore::update(&pool, bottle.id, "u1", &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.notes.as_deref(), Some(""));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_patch_is_a_successful_noop(pool: SqlitePool) {
    let input = CreateBottle {
        rating: Some(3),
        stock_level: Some(7),
        notes: Some("cellar row 4".to_string()),
        vintage_stocks: Some(vec![VintageStock { vintage: 2015, stock: 7 }]),
        ..new_bottle("Margaux", "Red")
    };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();

    let unchanged = InventoryStore::update(&pool, bottle.id, "u1", &UpdateBottle::default())
        .await
        .unwrap()
        .expect("empty patch must succeed, not report not-found");

    assert_eq!(unchanged.name, bottle.name);
    assert_eq!(unchanged.rating, bottle.rating);
    assert_eq!(unchanged.stock_level, bottle.stock_level);
    assert_eq!(unchanged.notes, bottle.notes);
    assert_eq!(unchanged.vintage_stocks.0, bottle.vintage_stocks.0);
    assert_eq!(unchanged.created_at, bottle.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_vintage_list_wholesale(pool: SqlitePool) {
    let input = CreateBottle {
        vintage_stocks: Some(vec![VintageStock { vintage: 2015, stock: 1 }]),
        ..new_bottle("Port", "Fortified")
    };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();

    let patch = UpdateBottle {
        vintage_stocks: Some(vec![
            VintageStock { vintage: 2017, stock: 2 },
            VintageStock { vintage: 2017, stock: 3 },
        ]),
        ..UpdateBottle::default()
    };
    let updated = InventoryStore::update(&pool, bottle.id, "u1", &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        updated.vintage_stocks.0,
        vec![
            VintageStock { vintage: 2017, stock: 2 },
            VintageStock { vintage: 2017, stock: 3 },
        ]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_wrong_owner_reports_not_found(pool: SqlitePool) {
    let bottle = InventoryStore::create(&pool, "u1", &new_bottle("Barolo", "Red"))
        .await
        .unwrap();

    let patch = UpdateBottle { rating: Some(Some(1)), ..UpdateBottle::default() };
    let result = InventoryStore::update(&pool, bottle.id, "u2", &patch).await.unwrap();
    assert!(result.is_none());

    // The owner's row is untouched.
    let current = InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().unwrap();
    assert_eq!(current.rating, None);
}

// ---------------------------------------------------------------------------
// Test: concurrency (last-writer-wins per field-set)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_disjoint_updates_both_land(pool: SqlitePool) {
    let bottle = InventoryStore::create(&pool, "u1", &new_bottle("Syrah", "Red"))
        .await
        .unwrap();

    let rating_patch = UpdateBottle { rating: Some(Some(4)), ..UpdateBottle::default() };
    let notes_patch = UpdateBottle {
        notes: Some(Some("peppery".to_string())),
        ..UpdateBottle::default()
    };

    // Each patch is a single conditional statement that only touches its own
    // fields, so neither ordering can drop the other's write.
    let (a, b) = tokio::join!(
        InventoryStore::update(&pool, bottle.id, "u1", &rating_patch),
        InventoryStore::update(&pool, bottle.id, "u1", &notes_patch),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    let current = InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().unwrap();
    assert_eq!(current.rating, Some(4));
    assert_eq!(current.notes.as_deref(), Some("peppery"));
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_semantics(pool: SqlitePool) {
    assert!(!InventoryStore::delete(&pool, 12345, "u1").await.unwrap());

    let bottle = InventoryStore::create(&pool, "u1", &new_bottle("Barolo", "Red"))
        .await
        .unwrap();

    // Wrong owner cannot delete.
    assert!(!InventoryStore::delete(&pool, bottle.id, "u2").await.unwrap());
    assert!(InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().is_some());

    assert!(InventoryStore::delete(&pool, bottle.id, "u1").await.unwrap());
    assert!(InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: end-to-end scenario
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_end_to_end_ownership_scenario(pool: SqlitePool) {
    let input = CreateBottle {
        stock_level: Some(2),
        vintage_stocks: Some(vec![VintageStock { vintage: 2018, stock: 2 }]),
        ..new_bottle("Barolo", "Red")
    };
    let bottle = InventoryStore::create(&pool, "u1", &input).await.unwrap();
    assert!(bottle.id > 0);
    assert_eq!(bottle.stock_level, 2);

    let patch = UpdateBottle { rating: Some(Some(4)), ..UpdateBottle::default() };
    let updated = InventoryStore::update(&pool, bottle.id, "u1", &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.stock_level, 2);
    assert_eq!(updated.rating, Some(4));

    let patch = UpdateBottle { rating: Some(Some(1)), ..UpdateBottle::default() };
    assert!(InventoryStore::update(&pool, bottle.id, "u2", &patch).await.unwrap().is_none());

    assert!(InventoryStore::delete(&pool, bottle.id, "u1").await.unwrap());
    assert!(InventoryStore::get_by_id(&pool, bottle.id, "u1").await.unwrap().is_none());
}
