//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CatalogError`]
//! via `#[from]` or a `From` impl, so callers match on one tagged kind.

use crate::catalog_number::CatalogNumber;

/// Top-level error returned by every catalog operation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Malformed or missing required input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The targeted catalog number is already taken.
    #[error("conflict: {0}")]
    Conflict(#[from] ConflictError),

    /// The targeted catalog number does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// The storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Input rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("catalog number must be provided and non-zero")]
    MissingCatalogNumber,

    #[error("invalid catalog number: {0:?}")]
    InvalidCatalogNumber(String),

    /// The request body could not be read as a product.
    #[error("malformed product: {0}")]
    MalformedProduct(String),
}

/// A create targeted a catalog number that already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Product with catalog number {catalog_number} already exists")]
pub struct ConflictError {
    pub catalog_number: CatalogNumber,
}

/// An update or delete targeted a catalog number that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Product with catalog number {catalog_number} does not exist")]
pub struct NotFoundError {
    pub catalog_number: CatalogNumber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_catalog_error() {
        let err: CatalogError = ValidationError::MissingCatalogNumber.into();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::MissingCatalogNumber)
        ));
    }

    #[test]
    fn should_mention_catalog_number_in_conflict_message() {
        let err = ConflictError {
            catalog_number: CatalogNumber::new(42),
        };
        assert_eq!(
            err.to_string(),
            "Product with catalog number 42 already exists"
        );
    }

    #[test]
    fn should_mention_catalog_number_in_not_found_message() {
        let err: CatalogError = NotFoundError {
            catalog_number: CatalogNumber::new(7),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "not found: Product with catalog number 7 does not exist"
        );
    }
}
