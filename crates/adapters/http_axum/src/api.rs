//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod products;

use axum::Router;
use axum::routing::get;

use catalog_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the products sub-router.
///
/// Collection routes answer both with and without a trailing slash.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let collection = get(products::list::<R>)
        .post(products::create::<R>)
        .put(products::update::<R>)
        .delete(products::delete::<R>);

    Router::new()
        .route("/products/stats", get(products::statistics::<R>))
        .route("/products", collection.clone())
        .route("/products/", collection)
        .route(
            "/products/{key}",
            get(products::list_by_path::<R>)
                .post(products::create_at::<R>)
                .put(products::update_at::<R>)
                .delete(products::delete_at::<R>),
        )
}
