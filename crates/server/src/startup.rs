use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StorageConfig, StoreBackend};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{
    asset::AssetManager,
    storage::{AssetStore, JsonFileAssetStore, MemoryAssetStore},
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the configured key-value backend. Called once per process.
pub async fn open_store(cfg: &StorageConfig) -> Result<Arc<dyn AssetStore>, StartupError> {
    match cfg.backend() {
        StoreBackend::File => {
            if cfg.path.trim().is_empty() {
                return Err(StartupError::InvalidConfig("storage.path is empty".into()));
            }
            let path = std::path::Path::new(&cfg.path);
            common::env::ensure_data_dir(path).await?;
            let store: Arc<dyn AssetStore> = JsonFileAssetStore::new(path).await?;
            info!(backend = "file", path = %cfg.path, "asset store opened");
            Ok(store)
        }
        StoreBackend::Memory => {
            info!(backend = "memory", "asset store opened");
            Ok(Arc::new(MemoryAssetStore::new()))
        }
    }
}

/// Build the router on top of an already opened store.
pub fn build_app(store: Arc<dyn AssetStore>) -> Router {
    let state = ServerState { assets: AssetManager::new(store) };
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = open_store(&cfg.storage).await?;
    let app = build_app(store);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "asset server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
