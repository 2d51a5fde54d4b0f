//! # catalog-adapter-storage-sqlite-sqlx
//!
//! Durable [`ProductRepository`](catalog_app::ports::ProductRepository) on
//! `SQLite` through [sqlx](https://docs.rs/sqlx).
//!
//! [`Config::build`] opens the pool and applies the embedded migrations;
//! [`SqliteProductRepository`] stores one row per product and performs every
//! conditional write as a single statement.

mod error;
mod pool;
mod product_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use product_repo::SqliteProductRepository;
