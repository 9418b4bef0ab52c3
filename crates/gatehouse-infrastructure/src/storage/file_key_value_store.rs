//! File-backed key-value store.
//!
//! All keys live in one TOML document (`storage.toml`) as a flat table of
//! strings, so the durable slot survives process restarts.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use gatehouse_core::GatehouseError;
use gatehouse_core::error::Result;
use gatehouse_core::storage::KeyValueStore;

use super::atomic_toml::AtomicTomlFile;
use crate::paths::GatehousePaths;

type Entries = BTreeMap<String, String>;

/// Profile-wide persistent [`KeyValueStore`].
///
/// Blocking file I/O runs on tokio's blocking pool. Writes hold an
/// exclusive lock for the whole read-modify-write cycle.
#[derive(Clone)]
pub struct FileKeyValueStore {
    file: AtomicTomlFile<Entries>,
}

impl FileKeyValueStore {
    /// Creates a store at the default location (`<data_dir>/storage.toml`).
    pub fn new(paths: &GatehousePaths) -> Result<Self> {
        Ok(Self::with_path(paths.storage_file()?))
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn run_blocking<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(AtomicTomlFile<Entries>) -> Result<R> + Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || op(file))
            .await
            .map_err(|e| GatehouseError::internal(format!("Storage task failed: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            let entries = file.load()?.unwrap_or_default();
            Ok(entries.get(&key).cloned())
        })
        .await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            file.update(Entries::new(), |entries| {
                entries.insert(key, value);
                true
            })?;
            Ok(())
        })
        .await?;
        tracing::debug!(path = %self.file.path().display(), "Key-value store updated");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        let removed = self
            .run_blocking(move |file| {
                file.update(Entries::new(), |entries| entries.remove(&key).is_some())
            })
            .await?;
        if removed {
            tracing::debug!(path = %self.file.path().display(), "Key-value entry removed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_path(temp_dir.path().join("storage.toml"));

        assert_eq!(store.get("currentUser").await.unwrap(), None);

        store
            .set("currentUser", r#"{"email":"a@b.com"}"#.to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get("currentUser").await.unwrap().as_deref(),
            Some(r#"{"email":"a@b.com"}"#)
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::with_path(temp_dir.path().join("storage.toml"));

        store.set("a", "1".to_string()).await.unwrap();
        store.set("b", "2".to_string()).await.unwrap();
        store.remove("a").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_remove_absent_key_does_not_create_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        let store = FileKeyValueStore::with_path(path.clone());

        store.remove("currentUser").await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        std::fs::write(&path, "[[[ definitely not toml").unwrap();

        let store = FileKeyValueStore::with_path(path);
        assert!(store.get("currentUser").await.is_err());
    }
}
