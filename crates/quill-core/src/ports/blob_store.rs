use async_trait::async_trait;

/// Blob store trait - abstraction over key-value persistence (file, memory, Redis).
///
/// Values are opaque bytes; the post store writes one serialized document per key.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BlobStoreError>;
}

/// Blob store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Quota exceeded: {size} bytes requested, {quota} allowed")]
    QuotaExceeded { size: usize, quota: usize },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
