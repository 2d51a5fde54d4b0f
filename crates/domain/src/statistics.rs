//! Aggregate figures computed over the whole catalog.

use std::collections::HashSet;

use serde::Serialize;

use crate::product::Product;

/// Derived summary of every stored product. Never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsStatistics {
    /// Sum of `quantity` across all products.
    pub number_of_all_products: i64,
    /// Count of distinct catalog numbers.
    pub number_of_different_products: u64,
    /// Mean `price`, or `0.0` when the catalog is empty.
    pub average_product_price: f64,
}

impl ProductsStatistics {
    /// Compute the aggregates in a single pass.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut seen = HashSet::new();
        let mut total_quantity = 0_i64;
        let mut total_price = 0.0_f64;
        let mut count = 0_u64;

        for product in products {
            seen.insert(product.catalog_number);
            total_quantity += i64::from(product.quantity);
            total_price += product.price;
            count += 1;
        }

        let average_product_price = if count == 0 {
            0.0
        } else {
            total_price / count as f64
        };

        Self {
            number_of_all_products: total_quantity,
            number_of_different_products: seen.len() as u64,
            average_product_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(n: i32) -> Product {
        Product::builder()
            .catalog_number(n)
            .price(f64::from(n))
            .quantity(n)
            .build()
            .unwrap()
    }

    #[test]
    fn should_return_zeroes_when_catalog_is_empty() {
        let stats = ProductsStatistics::from_products(std::iter::empty());
        assert_eq!(stats, ProductsStatistics::default());
    }

    #[test]
    fn should_aggregate_quantity_count_and_mean_price() {
        let products: Vec<Product> = (2..=10).map(product).collect();
        let stats = ProductsStatistics::from_products(&products);

        assert_eq!(stats.number_of_all_products, 54);
        assert_eq!(stats.number_of_different_products, 9);
        assert!((stats.average_product_price - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_serialize_with_camel_case_names() {
        let json = serde_json::to_value(ProductsStatistics::default()).unwrap();
        assert!(json.get("numberOfAllProducts").is_some());
        assert!(json.get("numberOfDifferentProducts").is_some());
        assert!(json.get("averageProductPrice").is_some());
    }
}
