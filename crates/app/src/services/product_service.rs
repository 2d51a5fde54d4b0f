//! Product catalog service: use-cases for managing products.

use std::collections::BTreeSet;

use catalog_domain::catalog_number::CatalogNumber;
use catalog_domain::error::{CatalogError, ConflictError, NotFoundError, ValidationError};
use catalog_domain::product::Product;
use catalog_domain::statistics::ProductsStatistics;

use crate::ports::ProductRepository;

/// Application service for product CRUD and statistics.
///
/// Stateless between calls; all state lives behind the repository.
pub struct ProductCatalogService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductCatalogService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List products, either all of them or only those in `ids`.
    ///
    /// An empty `ids` set means "all products". Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn list_products(
        &self,
        ids: &BTreeSet<CatalogNumber>,
    ) -> Result<Vec<Product>, CatalogError> {
        if ids.is_empty() {
            self.repo.get_all().await
        } else {
            self.repo.get_by_ids(ids).await
        }
    }

    /// Create a product under a catalog number that is not taken yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the catalog number is zero,
    /// [`CatalogError::Conflict`] when it already exists, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, product), fields(catalog_number = %product.catalog_number))]
    pub async fn create_product(&self, product: Product) -> Result<(), CatalogError> {
        product.validate()?;
        let catalog_number = product.catalog_number;

        if self.exists(catalog_number).await? {
            return Err(ConflictError { catalog_number }.into());
        }

        self.repo.add(product).await?;
        tracing::debug!("product created");
        Ok(())
    }

    /// Replace an existing product with the full incoming record.
    ///
    /// Fields left empty by the caller are overwritten, not merged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the catalog number is zero,
    /// [`CatalogError::NotFound`] when no product has it, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self, product), fields(catalog_number = %product.catalog_number))]
    pub async fn update_product(&self, product: Product) -> Result<(), CatalogError> {
        product.validate()?;
        let catalog_number = product.catalog_number;

        if !self.exists(catalog_number).await? {
            return Err(NotFoundError { catalog_number }.into());
        }

        self.repo.replace(product).await?;
        tracing::debug!("product updated");
        Ok(())
    }

    /// Delete an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the catalog number is zero,
    /// [`CatalogError::NotFound`] when no product has it, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, catalog_number: CatalogNumber) -> Result<(), CatalogError> {
        if !catalog_number.is_assigned() {
            return Err(ValidationError::MissingCatalogNumber.into());
        }

        if !self.exists(catalog_number).await? {
            return Err(NotFoundError { catalog_number }.into());
        }

        // A concurrent delete may have removed it since the check.
        if !self.repo.delete_by_id(catalog_number).await? {
            return Err(NotFoundError { catalog_number }.into());
        }
        tracing::debug!("product deleted");
        Ok(())
    }

    /// Compute aggregate figures over the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn statistics(&self) -> Result<ProductsStatistics, CatalogError> {
        self.repo.statistics().await
    }

    async fn exists(&self, catalog_number: CatalogNumber) -> Result<bool, CatalogError> {
        let ids = BTreeSet::from([catalog_number]);
        let found = self.repo.get_by_ids(&ids).await?;
        Ok(!found.is_empty())
    }
}
