//! In-memory store, used in place of the cache directory in tests

use crate::error::{Result, StoreError};
use crate::key::StatusKey;
use crate::store::ImageStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryImageStore {
    entries: RwLock<HashMap<StatusKey, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &StatusKey) -> bool {
        self.entries.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn get(&self, key: &StatusKey) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &StatusKey, data: &[u8]) -> Result<()> {
        self.entries.write().await.insert(*key, data.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &StatusKey) -> Result<()> {
        self.entries
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryImageStore::new();
        let key: StatusKey = "200".parse().unwrap();

        assert!(store.get(&key).await.unwrap().is_none());

        store.put(&key, b"ok").await.unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some(&b"ok"[..]));
        assert_eq!(store.len().await, 1);

        store.delete(&key).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.delete(&key).await,
            Err(StoreError::NotFound(k)) if k == key
        ));
    }
}
