//! # catalog-app
//!
//! Catalog use-cases behind the [`ports::ProductRepository`] boundary.
//!
//! [`services::product_service::ProductCatalogService`] enforces the rules a
//! write must pass (non-zero catalog number, uniqueness on create, existence
//! on update and delete) and leaves persistence to whichever repository it is
//! built with. Storage and HTTP adapters depend on this crate; it depends only
//! on `catalog-domain`.

pub mod ports;
pub mod services;
