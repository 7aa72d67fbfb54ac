use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Asset;

use crate::errors::ServiceError;
use crate::storage::{json_map_store::JsonMapStore, AssetStore};

/// Asset store persisted as a single JSON object `{assetId: record}`.
pub struct JsonFileAssetStore {
    store: Arc<JsonMapStore<String, Asset>>,
}

impl JsonFileAssetStore {
    /// Open the store at `path`, creating an empty file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Asset>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl AssetStore for JsonFileAssetStore {
    async fn get(&self, id: &str) -> Result<Option<Asset>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn put(&self, asset: Asset) -> Result<(), ServiceError> {
        self.store.insert(asset.asset_id.clone(), asset).await
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.store.remove(&id.to_string()).await
    }

    async fn scan_all(&self) -> Result<Vec<Asset>, ServiceError> {
        Ok(self.store.values().await)
    }
}
