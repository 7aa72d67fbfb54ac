//! Storage abstractions for service layer
//!
//! [`AssetStore`] is the key-value contract the asset manager consumes.
//! Implementations can be file-backed, in-memory, or remote KV.

pub mod file_store;
pub mod json_map_store;
pub mod memory_store;

use async_trait::async_trait;
use models::Asset;

use crate::errors::ServiceError;

pub use file_store::JsonFileAssetStore;
pub use memory_store::MemoryAssetStore;

/// Key-value backend for asset records, keyed by `asset_id`.
///
/// Each call is atomic on its own; nothing coordinates a sequence of calls.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Asset>, ServiceError>;
    /// Unconditional upsert keyed by `asset.asset_id`.
    async fn put(&self, asset: Asset) -> Result<(), ServiceError>;
    /// Returns whether a record existed. Deleting a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn scan_all(&self) -> Result<Vec<Asset>, ServiceError>;
}
