//! Validation failures for caller-supplied bottle data.
//!
//! Each variant names the offending field so the message can be surfaced
//! verbatim to the caller. Not-found is never an error in this system; it is
//! modeled as `Ok(None)` / `Ok(false)` at the call sites.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("rating must be between {min} and {max}, got {value}")]
    RatingOutOfRange { value: i64, min: i64, max: i64 },

    #[error("vintage year must be between {min} and {max}, got {value}")]
    VintageOutOfRange { value: i64, min: i64, max: i64 },

    #[error("stock level must not be negative, got {0}")]
    NegativeStock(i64),

    #[error("vintage stock count must not be negative, got {stock} for vintage {vintage}")]
    NegativeVintageStock { vintage: i64, stock: i64 },
}
