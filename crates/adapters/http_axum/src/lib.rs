//! # catalog-adapter-http-axum
//!
//! JSON over HTTP for the product catalog, served with
//! [axum](https://docs.rs/axum).
//!
//! Handlers parse catalog numbers and id lists, reject a missing or zero
//! catalog number with `400` before calling the service, and turn
//! [`CatalogError`](catalog_domain::error::CatalogError) kinds into status
//! codes. [`router::build`] is the entry point.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
