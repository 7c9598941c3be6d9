//! Application state - the post store and the configuration it was built from.

use std::sync::Arc;

use quill_core::PostStore;
use quill_core::ports::BlobStore;
use quill_infra::{FileBlobStore, InMemoryBlobStore};

use crate::config::{AppConfig, StorageBackend};

/// Everything a command needs.
#[derive(Debug)]
pub struct AppState {
    pub store: PostStore,
    pub config: AppConfig,
}

impl AppState {
    /// Connect the configured backend and load the saved posts.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let blob = connect(&config).await?;
        let store = PostStore::open(blob, config.store_config()).await;

        if let Some(err) = store.error() {
            tracing::warn!(error = %err, "Starting with an empty post list");
        }
        tracing::debug!(
            storage = ?config.storage,
            posts = store.posts().len(),
            "Application state initialized"
        );

        Ok(Self { store, config })
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn BlobStore>> {
    let blob: Arc<dyn BlobStore> = match config.storage {
        StorageBackend::File => Arc::new(FileBlobStore::new(&config.data_dir)),
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage - posts are discarded on exit");
            Arc::new(InMemoryBlobStore::new())
        }
        StorageBackend::Redis => connect_redis().await?,
    };
    Ok(blob)
}

#[cfg(feature = "redis")]
async fn connect_redis() -> anyhow::Result<Arc<dyn BlobStore>> {
    let store = quill_infra::RedisBlobStore::from_env().await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "redis"))]
async fn connect_redis() -> anyhow::Result<Arc<dyn BlobStore>> {
    anyhow::bail!("Redis storage requires the `redis` feature")
}
