//! Use-cases, each generic over the ports it drives.

pub mod product_service;
