use crate::error::Result;
use crate::key::StatusKey;
use async_trait::async_trait;

/// Key to bytes storage backing every request.
///
/// Implementations take no locks across calls: concurrent writers of the
/// same key race and the last write wins.
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Returns `Ok(None)` when no entry exists for `key`.
    async fn get(&self, key: &StatusKey) -> Result<Option<Vec<u8>>>;

    /// Replaces any existing entry for `key`.
    async fn put(&self, key: &StatusKey, data: &[u8]) -> Result<()>;

    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// there is nothing to remove.
    async fn delete(&self, key: &StatusKey) -> Result<()>;
}
