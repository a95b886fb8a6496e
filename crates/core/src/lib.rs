//! Pure domain logic for the cellar inventory tracker.
//!
//! No I/O, no async, no database types. The `cellar-db` crate builds the
//! persistence layer on top of the types and validation defined here.

pub mod catalog;
pub mod category;
pub mod error;
pub mod types;
pub mod validation;
