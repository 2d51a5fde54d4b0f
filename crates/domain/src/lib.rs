//! # catalog-domain
//!
//! Products, the catalog numbers that identify them, the statistics derived
//! from them, and the errors every catalog operation can return.
//!
//! Nothing here performs IO or knows about HTTP, SQL or async runtimes; the
//! `catalog-app` crate declares the storage boundary as a trait.

pub mod catalog_number;
pub mod error;
pub mod product;
pub mod statistics;
