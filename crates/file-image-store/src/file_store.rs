//! Flat-directory image store

use crate::error::{Result, StoreError};
use crate::key::StatusKey;
use crate::store::ImageStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

/// Distinguishes temp files of concurrent writers within this process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Image store keeping one `<key>.jpg` file per entry under `cache_dir`
pub struct FileImageStore {
    cache_dir: PathBuf,
}

impl FileImageStore {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Create the cache directory (and parents) if it is missing
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        info!(cache_dir = ?self.cache_dir, "Cache initialized");
        Ok(())
    }

    /// Path of the entry for `key`
    pub fn entry_path(&self, key: &StatusKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Keys currently present in the cache directory, sorted.
    ///
    /// Files that are not `<ddd>.jpg` are ignored.
    pub async fn keys(&self) -> Result<Vec<StatusKey>> {
        let mut dir = fs::read_dir(&self.cache_dir).await?;
        let mut keys = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(key) = entry.file_name().to_str().and_then(StatusKey::from_file_name) {
                keys.push(key);
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn temp_path(&self, key: &StatusKey) -> PathBuf {
        let seq = WRITE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.cache_dir
            .join(format!(".{}.{}.{}.tmp", key, std::process::id(), seq))
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn get(&self, key: &StatusKey) -> Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(key)).await {
            Ok(data) => {
                debug!(key = %key, size = data.len(), "Read cache entry");
                Ok(Some(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &StatusKey, data: &[u8]) -> Result<()> {
        // Readers only ever see the old file or the complete new one.
        let tmp = self.temp_path(key);
        let result = match fs::write(&tmp, data).await {
            Ok(()) => fs::rename(&tmp, self.entry_path(key)).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = ?tmp, error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(e.into());
        }

        debug!(key = %key, size = data.len(), "Wrote cache entry");
        Ok(())
    }

    async fn delete(&self, key: &StatusKey) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => {
                debug!(key = %key, "Deleted cache entry");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(*key)),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn key(s: &str) -> StatusKey {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_init_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let cache_dir = dir.path().join("a").join("b");
        let store = FileImageStore::new(&cache_dir);

        store.init().await.unwrap();
        assert!(cache_dir.is_dir());

        // Idempotent
        store.init().await.unwrap();
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        store.put(&key("200"), b"\xff\xd8jpeg").await.unwrap();

        let data = store.get(&key("200")).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"\xff\xd8jpeg"[..]));
        assert_eq!(
            std::fs::read(dir.path().join("200.jpg")).unwrap(),
            b"\xff\xd8jpeg"
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        assert!(store.get(&key("404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        store.put(&key("500"), b"first version").await.unwrap();
        store.put(&key("500"), b"second").await.unwrap();

        let data = store.get(&key("500")).await.unwrap().unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        store.put(&key("201"), b"a").await.unwrap();
        store.put(&key("201"), b"b").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["201.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_put_into_missing_dir_fails_cleanly() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path().join("missing"));

        let result = store.put(&key("200"), b"data").await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        store.put(&key("410"), b"gone").await.unwrap();
        store.delete(&key("410")).await.unwrap();

        assert!(store.get(&key("410")).await.unwrap().is_none());
        assert!(!dir.path().join("410.jpg").exists());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        let result = store.delete(&key("410")).await;
        assert!(matches!(result, Err(StoreError::NotFound(k)) if k == key("410")));
    }

    #[tokio::test]
    async fn test_keys_lists_only_entries() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path());
        store.init().await.unwrap();

        store.put(&key("503"), b"x").await.unwrap();
        store.put(&key("200"), b"y").await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        std::fs::write(dir.path().join("12.jpg"), b"ignored").unwrap();
        std::fs::create_dir(dir.path().join("999.jpg")).unwrap();

        let keys = store.keys().await.unwrap();
        assert_eq!(keys, vec![key("200"), key("503")]);
    }

    #[tokio::test]
    async fn test_concurrent_writers_last_write_wins() {
        let dir = tempdir().unwrap();
        let store = Arc::new(FileImageStore::new(dir.path()));
        store.init().await.unwrap();

        let writes = (0..8u8).map(|i| {
            let store = Arc::clone(&store);
            async move { store.put(&key("302"), &[i; 64]).await }
        });
        for result in futures::future::join_all(writes).await {
            result.unwrap();
        }

        // Whichever writer won, the entry is one complete payload.
        let data = store.get(&key("302")).await.unwrap().unwrap();
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|b| *b == data[0]));
        assert_eq!(store.keys().await.unwrap(), vec![key("302")]);
    }
}
