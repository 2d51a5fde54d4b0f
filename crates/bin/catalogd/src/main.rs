//! # catalogd, the product catalog daemon
//!
//! Reads [`config::Config`], installs the `tracing` subscriber, opens the
//! configured product store and serves the HTTP API until Ctrl-C or SIGTERM.
//! The only crate that sees every adapter at once.

mod config;

use catalog_adapter_http_axum::state::AppState;
use catalog_adapter_storage_memory::InMemoryProductRepository;
use catalog_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteProductRepository};
use catalog_app::ports::ProductRepository;
use catalog_app::services::product_service::ProductCatalogService;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log.filter))
        .init();

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let db = DatabaseConfig {
                database_url: config.storage.url.clone(),
            }
            .build()
            .await?;
            tracing::info!(url = %config.storage.url, "using sqlite storage");
            serve(SqliteProductRepository::new(db.pool().clone()), &config).await
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, data will not survive a restart");
            serve(InMemoryProductRepository::new(), &config).await
        }
    }
}

async fn serve<R>(repo: R, config: &Config) -> Result<(), Box<dyn std::error::Error>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let state = AppState::new(ProductCatalogService::new(repo));
    let app = catalog_adapter_http_axum::router::build(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "catalogd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("catalogd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
