//! Storage port: repository trait for product persistence.

use std::collections::BTreeSet;
use std::future::Future;

use catalog_domain::catalog_number::CatalogNumber;
use catalog_domain::error::CatalogError;
use catalog_domain::product::Product;
use catalog_domain::statistics::ProductsStatistics;

/// Repository for persisting and querying [`Product`]s keyed by catalog number.
///
/// Writes are conditional and atomic: the existence check and the write happen
/// as one storage operation, so concurrent callers cannot both win.
pub trait ProductRepository {
    /// Get every stored product.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Get the products whose catalog number is in `ids`. Unknown ids are
    /// omitted from the result.
    fn get_by_ids(
        &self,
        ids: &BTreeSet<CatalogNumber>,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Insert a product only if its catalog number is not stored yet.
    ///
    /// Fails with [`CatalogError::Conflict`] without writing when it is.
    fn add(&self, product: Product) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Overwrite the stored product with the same catalog number, in full.
    ///
    /// Fails with [`CatalogError::NotFound`] without writing when there is none.
    fn replace(&self, product: Product)
    -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Delete a product by catalog number. Returns whether a product was removed.
    fn delete_by_id(
        &self,
        id: CatalogNumber,
    ) -> impl Future<Output = Result<bool, CatalogError>> + Send;

    /// Compute aggregate figures over every stored product.
    fn statistics(&self) -> impl Future<Output = Result<ProductsStatistics, CatalogError>> + Send;
}
