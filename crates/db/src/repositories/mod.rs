//! Data-access layer. One repository per table.
//!
//! Repositories speak raw sqlx and return `sqlx::Error`; validation and the
//! public error taxonomy live one level up in [`crate::store`] and
//! [`crate::importer`].

pub mod bottle_repo;
pub mod catalog_repo;

pub use bottle_repo::BottleRepo;
pub use catalog_repo::CatalogRepo;
