//! Boundaries the application core needs implemented by adapters.

pub mod storage;

pub use storage::ProductRepository;
