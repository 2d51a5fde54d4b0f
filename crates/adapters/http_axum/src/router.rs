//! Top-level router: health check, products API, request tracing.

use axum::Router;
use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::routing::get;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use catalog_app::ports::ProductRepository;

use crate::error::error_response;
use crate::state::AppState;

/// Assemble the catalog HTTP surface around `state`.
///
/// Every request gets an `INFO` span with method and URI, and its status and
/// latency are logged when the response is sent.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: ProductRepository + Send + Sync + 'static,
{
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health))
        .merge(crate::api::routes())
        .fallback(unknown_route)
        .layer(trace)
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn unknown_route(uri: Uri) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use catalog_adapter_storage_memory::InMemoryProductRepository;
    use catalog_app::services::product_service::ProductCatalogService;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        build(AppState::new(ProductCatalogService::new(
            InMemoryProductRepository::new(),
        )))
    }

    async fn get_path(path: &str) -> Response {
        app()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_answer_health_check_with_plain_ok() {
        let response = get_path("/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn should_answer_unknown_route_with_json_not_found() {
        let response = get_path("/orders").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "no route for /orders");
    }
}
