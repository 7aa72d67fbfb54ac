use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps a `HashMap<K, V>` in memory and rewrites the whole file on every
/// mutation. The file is written to a sibling temp file and renamed over the
/// store file. A mutation whose write fails is undone in memory, so readers
/// never see a record the file does not hold.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    ///
    /// An existing file that does not hold a JSON map is an error rather than
    /// being silently replaced.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(ServiceError::store)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Store(format!("corrupt store file {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                persist(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::store(e)),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    /// All values, in map iteration order.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        if let Err(e) = persist(&self.file_path, &*map).await {
            match previous {
                Some(prev) => map.insert(key, prev),
                None => map.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(removed) = map.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = persist(&self.file_path, &*map).await {
            map.insert(key.clone(), removed);
            return Err(e);
        }
        Ok(true)
    }
}

async fn persist<K, V>(file_path: &Path, map: &HashMap<K, V>) -> Result<(), ServiceError>
where
    K: Eq + Hash + serde::Serialize,
    V: serde::Serialize,
{
    let data = serde_json::to_vec(map).map_err(ServiceError::store)?;
    let tmp_path = temp_path(file_path);
    fs::write(&tmp_path, data).await.map_err(ServiceError::store)?;
    if let Err(e) = fs::rename(&tmp_path, file_path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(ServiceError::store(e));
    }
    Ok(())
}

fn temp_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    file_path.with_file_name(name)
}
