//! # catalog-adapter-storage-memory
//!
//! In-memory implementation of the product repository port.
//!
//! Products live in a `BTreeMap` keyed by catalog number behind a
//! [`tokio::sync::RwLock`]. Every conditional write takes the write lock for
//! both the existence check and the mutation, so it is atomic with respect to
//! other callers. Data is lost when the process exits.
//!
//! ## Dependency rule
//!
//! Depends on `catalog-app` (port traits) and `catalog-domain` only.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use catalog_app::ports::ProductRepository;
use catalog_domain::catalog_number::CatalogNumber;
use catalog_domain::error::{CatalogError, ConflictError, NotFoundError};
use catalog_domain::product::Product;
use catalog_domain::statistics::ProductsStatistics;

/// Volatile product repository. Clones share the same store.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<BTreeMap<CatalogNumber, Product>>>,
}

impl InMemoryProductRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductRepository for InMemoryProductRepository {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let store = store.read().await;
            Ok(store.values().cloned().collect())
        }
    }

    fn get_by_ids(
        &self,
        ids: &BTreeSet<CatalogNumber>,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        let ids = ids.clone();
        async move {
            let store = store.read().await;
            Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
        }
    }

    fn add(&self, product: Product) -> impl Future<Output = Result<(), CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let mut store = store.write().await;
            let catalog_number = product.catalog_number;
            if store.contains_key(&catalog_number) {
                return Err(ConflictError { catalog_number }.into());
            }
            store.insert(catalog_number, product);
            Ok(())
        }
    }

    fn replace(&self, product: Product) -> impl Future<Output = Result<(), CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let mut store = store.write().await;
            let catalog_number = product.catalog_number;
            match store.get_mut(&catalog_number) {
                Some(slot) => {
                    *slot = product;
                    Ok(())
                }
                None => Err(NotFoundError { catalog_number }.into()),
            }
        }
    }

    fn delete_by_id(
        &self,
        id: CatalogNumber,
    ) -> impl Future<Output = Result<bool, CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        async move { Ok(store.write().await.remove(&id).is_some()) }
    }

    fn statistics(&self) -> impl Future<Output = Result<ProductsStatistics, CatalogError>> + Send {
        let store = Arc::clone(&self.store);
        async move {
            let store = store.read().await;
            Ok(ProductsStatistics::from_products(store.values()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_app::services::product_service::ProductCatalogService;
    use tokio::task::JoinSet;

    fn product(n: i32) -> Product {
        Product::builder()
            .catalog_number(n)
            .price(f64::from(n))
            .quantity(n)
            .name(format!("Product {n}"))
            .build()
            .unwrap()
    }

    fn ids(range: impl IntoIterator<Item = i32>) -> BTreeSet<CatalogNumber> {
        range.into_iter().map(CatalogNumber::new).collect()
    }

    async fn seeded(range: impl IntoIterator<Item = i32>) -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        for n in range {
            repo.add(product(n)).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn should_return_conflict_when_adding_existing_key() {
        let repo = seeded([1]).await;
        let mut other = product(1);
        other.name = "Other".to_string();

        let result = repo.add(other).await;
        assert!(matches!(result, Err(CatalogError::Conflict(_))));
        assert_eq!(repo.get_all().await.unwrap(), vec![product(1)]);
    }

    #[tokio::test]
    async fn should_return_products_matching_ids_only() {
        let repo = seeded(1..=10).await;

        assert_eq!(repo.get_all().await.unwrap().len(), 10);

        let some = repo.get_by_ids(&ids(1..=5)).await.unwrap();
        let numbers: Vec<i32> = some.iter().map(|p| p.catalog_number.get()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn should_omit_unknown_ids() {
        let repo = seeded([1, 2]).await;
        let found = repo.get_by_ids(&ids([2, 40])).await.unwrap();
        assert_eq!(found, vec![product(2)]);
    }

    #[tokio::test]
    async fn should_look_up_id_sets_larger_than_the_bind_limit() {
        let repo = seeded([1, 500, 501, 39_999]).await;

        let found = repo.get_by_ids(&ids(1..=40_000)).await.unwrap();

        let numbers: Vec<i32> = found.iter().map(|p| p.catalog_number.get()).collect();
        assert_eq!(numbers, vec![1, 500, 501, 39_999]);
    }

    #[tokio::test]
    async fn should_return_not_found_when_replacing_missing_key() {
        let repo = InMemoryProductRepository::new();
        let result = repo.replace(product(5)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_replace_whole_record_when_present() {
        let repo = seeded([1]).await;
        let mut updated = product(1);
        updated.price = 11.0;
        updated.quantity = 11;

        repo.replace(updated.clone()).await.unwrap();
        assert_eq!(repo.get_by_ids(&ids([1])).await.unwrap(), vec![updated]);
    }

    #[tokio::test]
    async fn should_report_whether_delete_removed_a_product() {
        let repo = seeded(1..=3).await;
        assert!(repo.delete_by_id(CatalogNumber::new(2)).await.unwrap());
        assert!(!repo.delete_by_id(CatalogNumber::new(2)).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_compute_statistics_over_all_products() {
        let repo = seeded(2..=10).await;

        let stats = repo.statistics().await.unwrap();
        assert_eq!(stats.number_of_all_products, 54);
        assert_eq!(stats.number_of_different_products, 9);
        assert!((stats.average_product_price - 6.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_share_store_between_clones() {
        let repo = InMemoryProductRepository::new();
        let other = repo.clone();
        repo.add(product(4)).await.unwrap();
        assert_eq!(other.get_all().await.unwrap(), vec![product(4)]);
    }

    #[tokio::test]
    async fn should_accept_exactly_one_of_concurrent_creates() {
        let svc = Arc::new(ProductCatalogService::new(InMemoryProductRepository::new()));

        let mut tasks = JoinSet::new();
        for attempt in 0..16 {
            let svc = Arc::clone(&svc);
            tasks.spawn(async move {
                let mut p = product(7);
                p.name = format!("Attempt {attempt}");
                svc.create_product(p).await
            });
        }

        let mut created = 0;
        let mut conflicts = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(()) => created += 1,
                Err(CatalogError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(svc.list_products(&BTreeSet::new()).await.unwrap().len(), 1);
    }
}
