//! In-memory blob store - used for tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::ports::{BlobStore, BlobStoreError};

/// In-memory blob store using a HashMap behind an async RwLock.
///
/// An optional quota caps the size of a single value, the way browser
/// storage rejects oversized writes.
/// Note: Data is lost on process restart.
pub struct InMemoryBlobStore {
    store: RwLock<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: None,
        }
    }

    /// Reject values larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BlobStoreError> {
        if let Some(quota) = self.quota.filter(|quota| value.len() > *quota) {
            tracing::warn!(key = %key, size = value.len(), quota, "Blob rejected, quota exceeded");
            return Err(BlobStoreError::QuotaExceeded {
                size: value.len(),
                quota,
            });
        }

        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
