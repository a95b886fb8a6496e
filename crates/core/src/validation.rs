//! Pure field validation for inventory records.
//!
//! Everything here runs before any SQL is issued: a payload that fails
//! validation never touches storage. The functions take the individual
//! field values rather than the DTO structs so `cellar-core` stays free of
//! persistence types.

use chrono::{Datelike, Utc};

use crate::category::BottleCategory;
use crate::error::ValidationError;

/// Lowest accepted vintage year.
pub const MIN_VINTAGE_YEAR: i64 = 1900;

/// Inclusive rating bounds.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Highest accepted vintage year: the current calendar year.
pub fn max_vintage_year() -> i64 {
    i64::from(Utc::now().year())
}

/// Reject an empty or whitespace-only display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Reject a category string outside the fixed enumeration, returning the
/// parsed category on success.
pub fn validate_category(category: &str) -> Result<BottleCategory, ValidationError> {
    BottleCategory::from_str(category)
        .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))
}

/// Reject a rating outside `[1, 5]`.
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange {
            value: rating,
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    Ok(())
}

/// Reject a negative aggregate stock level.
pub fn validate_stock_level(stock: i64) -> Result<(), ValidationError> {
    if stock < 0 {
        return Err(ValidationError::NegativeStock(stock));
    }
    Ok(())
}

/// Reject a (vintage, stock) pair with an out-of-range year or negative count.
///
/// Duplicate vintage years across pairs are allowed; no dedup happens here or
/// anywhere else.
pub fn validate_vintage_stock(vintage: i64, stock: i64) -> Result<(), ValidationError> {
    let max = max_vintage_year();
    if !(MIN_VINTAGE_YEAR..=max).contains(&vintage) {
        return Err(ValidationError::VintageOutOfRange {
            value: vintage,
            min: MIN_VINTAGE_YEAR,
            max,
        });
    }
    if stock < 0 {
        return Err(ValidationError::NegativeVintageStock { vintage, stock });
    }
    Ok(())
}
