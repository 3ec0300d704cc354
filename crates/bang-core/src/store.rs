//! Persistence gateway for bang mappings
//!
//! The editor reads and writes the whole mapping under a single key. A store
//! holds nothing else the editor cares about; any other keys are preserved.

use crate::error::{Error, Result};
use crate::mapping::BangMapping;
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default storage key for the mapping
pub const DEFAULT_STORAGE_KEY: &str = "bangs";

/// Async key/value storage of bang mappings
#[allow(async_fn_in_trait)]
pub trait BangStore {
    /// Read the mapping stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<BangMapping>>;

    /// Replace the mapping stored under `key`
    async fn set(&mut self, key: &str, mapping: &BangMapping) -> Result<()>;
}

/// In-memory store, used for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: IndexMap<String, BangMapping>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `mapping` under `key`
    pub fn with_mapping(key: impl Into<String>, mapping: BangMapping) -> Self {
        let mut values = IndexMap::new();
        values.insert(key.into(), mapping);
        Self { values }
    }

    /// Read a value without going through the async interface
    pub fn peek(&self, key: &str) -> Option<&BangMapping> {
        self.values.get(key)
    }
}

impl BangStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<BangMapping>> {
        Ok(self.values.get(key).cloned())
    }

    async fn set(&mut self, key: &str, mapping: &BangMapping) -> Result<()> {
        self.values.insert(key.to_string(), mapping.clone());
        Ok(())
    }
}

/// Store backed by a JSON document of `{ key: mapping }`
///
/// A missing file reads as an empty store. Only the requested key has to hold
/// a mapping; other keys may hold any JSON value. Writes rewrite the whole
/// document pretty-printed, keeping every other key untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_document(&self, key: &str) -> Result<IndexMap<String, Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(e) => {
                return Err(Error::FileRead {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(IndexMap::new());
        }

        serde_json::from_str(&content).map_err(|e| self.corrupt(key, e))
    }

    fn corrupt(&self, key: &str, e: serde_json::Error) -> Error {
        Error::Storage {
            key: key.to_string(),
            message: format!("corrupt store '{}': {}", self.path.display(), e),
        }
    }
}

impl BangStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<BangMapping>> {
        let mut document = self.load_document(key).await?;
        match document.shift_remove(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| self.corrupt(key, e)),
            None => Ok(None),
        }
    }

    async fn set(&mut self, key: &str, mapping: &BangMapping) -> Result<()> {
        let mut document = self.load_document(key).await?;
        document.insert(key.to_string(), serde_json::to_value(mapping)?);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Error::FileWrite {
                path: self.path.clone(),
                source: e,
            })?;
        debug!(path = %self.path.display(), key, entries = mapping.len(), "Wrote bang store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BangMapping {
        [("d", "https://duckduckgo.com?q=%s"), ("g", "https://google.com?q=%s")]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);

        store.set(DEFAULT_STORAGE_KEY, &sample()).await.unwrap();

        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some(sample()));
        assert_eq!(store.peek(DEFAULT_STORAGE_KEY), Some(&sample()));
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut store = JsonFileStore::new(&path);

        let other: BangMapping = [("x", "https://example.com?q=%s")].into_iter().collect();
        store.set("other", &other).await.unwrap();
        store.set(DEFAULT_STORAGE_KEY, &sample()).await.unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some(sample()));
        assert_eq!(reopened.get("other").await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn test_file_store_tolerates_non_mapping_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(
            &path,
            r#"{"bangs": {"d": "https://duckduckgo.com?q=%s"}, "theme": "dark", "limits": [1, 2]}"#,
        )
        .unwrap();
        let mut store = JsonFileStore::new(&path);

        let stored = store.get(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(stored.get("d"), Some("https://duckduckgo.com?q=%s"));

        store.set(DEFAULT_STORAGE_KEY, &sample()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let document: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document["theme"], "dark");
        assert_eq!(document["limits"], serde_json::json!([1, 2]));
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"bangs": {"a": 1}}"#).unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.get(DEFAULT_STORAGE_KEY).await.unwrap_err();
        assert!(matches!(err, Error::Storage { ref key, .. } if key == "bangs"));
    }
}
