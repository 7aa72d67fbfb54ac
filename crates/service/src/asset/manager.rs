use std::sync::Arc;

use models::{Asset, ValidatedAsset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::asset::body::RawBody;
use crate::errors::ServiceError;
use crate::storage::AssetStore;

/// Acknowledgement returned by [`AssetManager::delete`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub asset_id: String,
    pub process: String,
}

/// Application service for asset records.
///
/// Holds only the store handle; every operation re-reads what it needs.
/// Expected failures come back as [`ServiceError::MalformedInput`],
/// [`ServiceError::Validation`] or [`ServiceError::NotFound`]. Store failures
/// are passed through untouched.
#[derive(Clone)]
pub struct AssetManager {
    store: Arc<dyn AssetStore>,
}

impl AssetManager {
    pub fn new(store: Arc<dyn AssetStore>) -> Self { Self { store } }

    /// Field checks on an already decoded candidate; reports every violation.
    pub fn validate(&self, candidate: &Value) -> Result<ValidatedAsset, ServiceError> {
        Ok(models::validate(candidate)?)
    }

    /// Parse, validate and store a new record under a freshly generated id.
    #[instrument(skip_all)]
    pub async fn create<'a>(&self, body: impl Into<RawBody<'a>>) -> Result<Asset, ServiceError> {
        let candidate = body.into().parse()?;
        let validated = self.validate(&candidate)?;
        // v4 ids are not checked against the store
        let asset = validated.into_asset(Uuid::new_v4().to_string());
        self.store.put(asset.clone()).await?;
        info!(asset_id = %asset.asset_id, "asset created");
        Ok(asset)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Asset, ServiceError> {
        self.fetch(id).await
    }

    /// Every stored record in store order; empty store gives an empty vec.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Asset>, ServiceError> {
        let assets = self.store.scan_all().await?;
        debug!(count = assets.len(), "listed assets");
        Ok(assets)
    }

    /// Replace all fields of an existing record, keeping `id`.
    ///
    /// Existence is checked before the body is looked at, so an unknown id is
    /// always `NotFound` whatever the body holds. An `assetId` in the body is
    /// ignored.
    #[instrument(skip(self, body))]
    pub async fn update<'a>(&self, id: &str, body: impl Into<RawBody<'a>>) -> Result<Asset, ServiceError> {
        self.fetch(id).await?;
        let candidate = body.into().parse()?;
        let validated = self.validate(&candidate)?;
        let asset = validated.into_asset(id);
        self.store.put(asset.clone()).await?;
        info!(asset_id = %id, "asset updated");
        Ok(asset)
    }

    /// Remove an existing record. Deleting twice is `NotFound` the second time.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteConfirmation, ServiceError> {
        self.fetch(id).await?;
        self.store.delete(id).await?;
        info!(asset_id = %id, "asset deleted");
        Ok(DeleteConfirmation { asset_id: id.to_string(), process: format!("{id} successfully deleted") })
    }

    async fn fetch(&self, id: &str) -> Result<Asset, ServiceError> {
        self.store.get(id).await?.ok_or_else(|| ServiceError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryAssetStore;
    use async_trait::async_trait;
    use serde_json::json;

    fn manager() -> AssetManager { AssetManager::new(Arc::new(MemoryAssetStore::new())) }

    const LAPTOP: &str = r#"{"name":"Laptop","serialNo":"SN-1","assignDate":"2024-01-01"}"#;

    #[tokio::test]
    async fn create_then_get_returns_same_record() -> Result<(), anyhow::Error> {
        let m = manager();
        let created = m.create(LAPTOP).await?;
        assert!(!created.asset_id.is_empty());
        assert_eq!(created.name, "Laptop");
        assert_eq!(created.serial_no, "SN-1");
        assert_eq!(created.assign_date, "2024-01-01");

        let fetched = m.get(&created.asset_id).await?;
        assert_eq!(fetched, created);
        Ok(())
    }

    #[tokio::test]
    async fn create_accepts_structured_body() -> Result<(), anyhow::Error> {
        let m = manager();
        let created = m.create(json!({"name": "Phone", "serialNo": "SN-9", "assignDate": "2023-12-31"})).await?;
        assert_eq!(created.name, "Phone");
        Ok(())
    }

    #[tokio::test]
    async fn create_generates_distinct_ids() -> Result<(), anyhow::Error> {
        let m = manager();
        let a = m.create(LAPTOP).await?;
        let b = m.create(LAPTOP).await?;
        assert_ne!(a.asset_id, b.asset_id);
        assert_eq!(m.list().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_reports_each_missing_field() {
        let m = manager();
        match m.create(r#"{"serialNo":"SN-1","assignDate":"2024-01-01"}"#).await {
            Err(ServiceError::Validation(e)) => assert_eq!(e.violations(), ["name is a required field"]),
            other => panic!("expected validation error, got {other:?}"),
        }
        match m.create(r#"{"assignDate":"2024-01-01"}"#).await {
            Err(ServiceError::Validation(e)) => assert_eq!(e.violations().len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_with_bad_json_is_malformed_not_validation() -> Result<(), anyhow::Error> {
        let m = manager();
        let err = m.create(r#"{"name": "Laptop""#).await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedInput(_)));
        assert!(m.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let err = manager().get("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { ref id } if id == "missing"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_even_with_bad_body() {
        let m = manager();
        for body in ["{}", "not json", LAPTOP] {
            let err = m.update("missing", body).await.unwrap_err();
            assert!(matches!(err, ServiceError::NotFound { .. }), "body {body:?} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn update_keeps_path_id_and_replaces_fields() -> Result<(), anyhow::Error> {
        let m = manager();
        let created = m.create(LAPTOP).await?;
        let body = json!({
            "assetId": "someone-else",
            "name": "Laptop Pro",
            "serialNo": "SN-2",
            "assignDate": "2024-06-30"
        });
        let updated = m.update(&created.asset_id, body).await?;
        assert_eq!(updated.asset_id, created.asset_id);
        assert_eq!(updated.name, "Laptop Pro");
        assert_eq!(m.get(&created.asset_id).await?, updated);
        assert!(matches!(m.get("someone-else").await, Err(ServiceError::NotFound { .. })));
        assert_eq!(m.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_existing_with_bad_body_leaves_record() -> Result<(), anyhow::Error> {
        let m = manager();
        let created = m.create(LAPTOP).await?;
        assert!(matches!(m.update(&created.asset_id, "{").await, Err(ServiceError::MalformedInput(_))));
        assert!(matches!(m.update(&created.asset_id, "{}").await, Err(ServiceError::Validation(_))));
        assert_eq!(m.get(&created.asset_id).await?, created);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() -> Result<(), anyhow::Error> {
        let m = manager();
        let created = m.create(LAPTOP).await?;
        let confirmation = m.delete(&created.asset_id).await?;
        assert_eq!(confirmation.asset_id, created.asset_id);
        assert!(matches!(m.get(&created.asset_id).await, Err(ServiceError::NotFound { .. })));
        assert!(matches!(m.delete(&created.asset_id).await, Err(ServiceError::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn list_counts_concurrent_creates() -> Result<(), anyhow::Error> {
        let m = manager();
        assert!(m.list().await?.is_empty());

        let mut handles = Vec::new();
        for i in 0..16 {
            let m = m.clone();
            handles.push(tokio::spawn(async move {
                let body = json!({
                    "name": format!("asset-{i}"),
                    "serialNo": format!("SN-{i}"),
                    "assignDate": "2024-01-01"
                });
                m.create(body).await
            }));
        }
        for h in handles {
            h.await??;
        }
        assert_eq!(m.list().await?.len(), 16);
        Ok(())
    }

    struct UnavailableStore;

    #[async_trait]
    impl AssetStore for UnavailableStore {
        async fn get(&self, _id: &str) -> Result<Option<Asset>, ServiceError> {
            Err(ServiceError::store("connection refused"))
        }

        async fn put(&self, _asset: Asset) -> Result<(), ServiceError> {
            Err(ServiceError::store("connection refused"))
        }

        async fn delete(&self, _id: &str) -> Result<bool, ServiceError> {
            Err(ServiceError::store("connection refused"))
        }

        async fn scan_all(&self) -> Result<Vec<Asset>, ServiceError> {
            Err(ServiceError::store("connection refused"))
        }
    }

    #[tokio::test]
    async fn store_failures_pass_through_unclassified() {
        let m = AssetManager::new(Arc::new(UnavailableStore));
        assert!(matches!(m.create(LAPTOP).await, Err(ServiceError::Store(_))));
        assert!(matches!(m.get("x").await, Err(ServiceError::Store(_))));
        assert!(matches!(m.list().await, Err(ServiceError::Store(_))));
        assert!(matches!(m.update("x", LAPTOP).await, Err(ServiceError::Store(_))));
        assert!(matches!(m.delete("x").await, Err(ServiceError::Store(_))));
    }
}
