//! Product: the record managed by the catalog.

use serde::Serialize;

use crate::catalog_number::CatalogNumber;
use crate::error::{CatalogError, ValidationError};

/// A stocked product, identified by its caller-supplied catalog number.
///
/// `category` and `vendor` are left out of the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub catalog_number: CatalogNumber,
    pub price: f64,
    pub quantity: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
}

impl Product {
    /// Create a builder for constructing a [`Product`].
    #[must_use]
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the catalog number is the
    /// zero sentinel.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.catalog_number.is_assigned() {
            return Err(ValidationError::MissingCatalogNumber.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Product`].
#[derive(Debug, Default)]
pub struct ProductBuilder {
    catalog_number: Option<CatalogNumber>,
    price: f64,
    quantity: i32,
    name: Option<String>,
    category: Option<String>,
    vendor: Option<String>,
}

impl ProductBuilder {
    #[must_use]
    pub fn catalog_number(mut self, catalog_number: impl Into<CatalogNumber>) -> Self {
        self.catalog_number = Some(catalog_number.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Consume the builder, validate, and return a [`Product`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the catalog number is missing
    /// or zero.
    pub fn build(self) -> Result<Product, CatalogError> {
        let product = Product {
            catalog_number: self.catalog_number.unwrap_or_default(),
            price: self.price,
            quantity: self.quantity,
            name: self.name.unwrap_or_default(),
            category: self.category,
            vendor: self.vendor,
        };
        product.validate()?;
        Ok(product)
    }
}
