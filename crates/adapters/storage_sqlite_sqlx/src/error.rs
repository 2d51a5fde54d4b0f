//! Failures of the `SQLite` product store.

use catalog_domain::error::CatalogError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connecting, querying or decoding a row failed.
    #[error("sqlite query failed")]
    Query(#[from] sqlx::Error),

    #[error("products schema migration failed")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
