//! `SQLite` implementation of [`ProductRepository`].

use std::collections::BTreeSet;
use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use catalog_app::ports::ProductRepository;
use catalog_domain::catalog_number::CatalogNumber;
use catalog_domain::error::{CatalogError, ConflictError, NotFoundError};
use catalog_domain::product::Product;
use catalog_domain::statistics::ProductsStatistics;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Product`].
struct Wrapper(Product);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let catalog_number: i32 = row.try_get("catalog_number")?;

        Ok(Self(Product {
            catalog_number: CatalogNumber::new(catalog_number),
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            vendor: row.try_get("vendor")?,
        }))
    }
}

/// Wrapper for converting the aggregate row into [`ProductsStatistics`].
struct StatisticsRow(ProductsStatistics);

impl<'r> FromRow<'r, SqliteRow> for StatisticsRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let different: i64 = row.try_get("number_of_different_products")?;
        let different =
            u64::try_from(different).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ProductsStatistics {
            number_of_all_products: row.try_get("number_of_all_products")?,
            number_of_different_products: different,
            average_product_price: row.try_get("average_product_price")?,
        }))
    }
}

const INSERT_IF_ABSENT: &str = "INSERT INTO products (catalog_number, price, quantity, name, category, vendor) \
     VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT (catalog_number) DO NOTHING";
const SELECT_ALL: &str = "SELECT * FROM products ORDER BY catalog_number";
/// Bound parameters per `IN (...)` lookup, well under SQLite's variable limit.
const IDS_PER_QUERY: usize = 500;
const SELECT_BY_IDS_PREFIX: &str = "SELECT * FROM products WHERE catalog_number IN (";
const REPLACE_IF_PRESENT: &str = "UPDATE products SET price = ?, quantity = ?, name = ?, category = ?, vendor = ? \
     WHERE catalog_number = ?";
const DELETE_BY_ID: &str = "DELETE FROM products WHERE catalog_number = ?";
const STATISTICS: &str = "SELECT COALESCE(SUM(quantity), 0) AS number_of_all_products, \
     COUNT(DISTINCT catalog_number) AS number_of_different_products, \
     COALESCE(AVG(price), 0.0) AS average_product_price \
     FROM products";

/// `SQLite`-backed product repository.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for SqliteProductRepository {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_by_ids(
        &self,
        ids: &BTreeSet<CatalogNumber>,
    ) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        async move {
            let mut products = Vec::new();
            // Ids arrive sorted, so chunk results concatenate in order.
            for chunk in ids.chunks(IDS_PER_QUERY) {
                let mut query = QueryBuilder::<Sqlite>::new(SELECT_BY_IDS_PREFIX);
                let mut separated = query.separated(", ");
                for id in chunk {
                    separated.push_bind(*id);
                }
                separated.push_unseparated(") ORDER BY catalog_number");

                let rows: Vec<Wrapper> = query
                    .build_query_as()
                    .fetch_all(&pool)
                    .await
                    .map_err(StorageError::from)?;
                products.extend(rows.into_iter().map(|w| w.0));
            }
            Ok(products)
        }
    }

    fn add(&self, product: Product) -> impl Future<Output = Result<(), CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT_IF_ABSENT)
                .bind(product.catalog_number.get())
                .bind(product.price)
                .bind(product.quantity)
                .bind(&product.name)
                .bind(&product.category)
                .bind(&product.vendor)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(ConflictError {
                    catalog_number: product.catalog_number,
                }
                .into());
            }
            Ok(())
        }
    }

    fn replace(&self, product: Product) -> impl Future<Output = Result<(), CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(REPLACE_IF_PRESENT)
                .bind(product.price)
                .bind(product.quantity)
                .bind(&product.name)
                .bind(&product.category)
                .bind(&product.vendor)
                .bind(product.catalog_number.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    catalog_number: product.catalog_number,
                }
                .into());
            }
            Ok(())
        }
    }

    fn delete_by_id(
        &self,
        id: CatalogNumber,
    ) -> impl Future<Output = Result<bool, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn statistics(&self) -> impl Future<Output = Result<ProductsStatistics, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: StatisticsRow = sqlx::query_as(STATISTICS)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }
}
