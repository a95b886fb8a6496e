//! Header resolution for the external catalog CSV source.
//!
//! The source file's column names have drifted over time (`SUBTYPE` vs
//! `SUB_TYPE` vs `subType`), so each target field carries a small fixed alias
//! list. Headers are lowercased before comparison; within a field the aliases
//! are tried in order, canonical name first, and the first header that
//! matches wins. The alias set must not change without coordinating with the
//! catalog source file.

/// Sentinel category assigned when the source has no usable category value.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Header aliases per target field, canonical name first.
pub const NAME_ALIASES: &[&str] = &["NAME", "name"];
pub const CATEGORY_ALIASES: &[&str] = &["TYPE", "category"];
pub const WINE_ALIASES: &[&str] = &["WINE", "wine"];
pub const SUB_TYPE_ALIASES: &[&str] = &["SUBTYPE", "SUB_TYPE", "subType"];
pub const PRODUCER_ALIASES: &[&str] = &["PRODUCER", "producer"];
pub const REGION_ALIASES: &[&str] = &["REGION", "region"];
pub const COUNTRY_ALIASES: &[&str] = &["COUNTRY", "country"];

/// Resolved column indexes for one CSV file.
///
/// `None` means the file has no column for that field; the importer then
/// falls back to the field default (`"Other"` for category, `NULL` for the
/// optional text fields).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub category: Option<usize>,
    pub wine: Option<usize>,
    pub sub_type: Option<usize>,
    pub producer: Option<usize>,
    pub region: Option<usize>,
    pub country: Option<usize>,
}

impl ColumnMap {
    /// Resolve all seven target fields against a header row.
    pub fn resolve(headers: &[&str]) -> Self {
        Self {
            name: find_column(headers, NAME_ALIASES),
            category: find_column(headers, CATEGORY_ALIASES),
            wine: find_column(headers, WINE_ALIASES),
            sub_type: find_column(headers, SUB_TYPE_ALIASES),
            producer: find_column(headers, PRODUCER_ALIASES),
            region: find_column(headers, REGION_ALIASES),
            country: find_column(headers, COUNTRY_ALIASES),
        }
    }
}

/// Find the index of the first header matching any alias, case-insensitively.
///
/// Aliases are tried in order so the canonical name beats a legacy one when a
/// file carries both.
pub fn find_column(headers: &[&str], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        let alias_lower = alias.to_lowercase();
        if let Some(idx) = headers
            .iter()
            .position(|h| h.trim().to_lowercase() == alias_lower)
        {
            return Some(idx);
        }
    }
    None
}

/// Trim a raw field value, mapping empty to `None`.
pub fn clean_field(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}
