use async_trait::async_trait;
use dashmap::DashMap;
use models::Asset;

use crate::errors::ServiceError;
use crate::storage::AssetStore;

/// Process-local asset store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryAssetStore {
    records: DashMap<String, Asset>,
}

impl MemoryAssetStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn get(&self, id: &str) -> Result<Option<Asset>, ServiceError> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn put(&self, asset: Asset) -> Result<(), ServiceError> {
        self.records.insert(asset.asset_id.clone(), asset);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.records.remove(id).is_some())
    }

    async fn scan_all(&self) -> Result<Vec<Asset>, ServiceError> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }
}
