//! The fixed bottle category enumeration.
//!
//! Inventory records must carry one of these canonical names. The catalog
//! importer falls back to [`BottleCategory::Other`] when the source file has
//! no usable category column.

use serde::{Deserialize, Serialize};

/// Category of a bottle, stored in the database as its canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleCategory {
    Red,
    White,
    Rose,
    Sparkling,
    Dessert,
    Fortified,
    Spirit,
    Other,
}

impl BottleCategory {
    /// Return the canonical name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::White => "White",
            Self::Rose => "Rose",
            Self::Sparkling => "Sparkling",
            Self::Dessert => "Dessert",
            Self::Fortified => "Fortified",
            Self::Spirit => "Spirit",
            Self::Other => "Other",
        }
    }

    /// Parse a canonical category name. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Red" => Some(Self::Red),
            "White" => Some(Self::White),
            "Rose" => Some(Self::Rose),
            "Sparkling" => Some(Self::Sparkling),
            "Dessert" => Some(Self::Dessert),
            "Fortified" => Some(Self::Fortified),
            "Spirit" => Some(Self::Spirit),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    /// All valid category names.
    pub const ALL: &'static [&'static str] = &[
        "Red",
        "White",
        "Rose",
        "Sparkling",
        "Dessert",
        "Fortified",
        "Spirit",
        "Other",
    ];
}

impl std::fmt::Display for BottleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
