//! Redis blob store - keeps the post collection in a Redis string.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use quill_core::ports::{BlobStore, BlobStoreError};

/// Redis connection configuration.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis URL (e.g., redis://localhost:6379)
    pub url: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Prefix prepended to every key
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            connect_timeout: Duration::from_secs(5),
            key_prefix: "quill:".to_string(),
        }
    }
}

impl RedisConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            connect_timeout: std::env::var("REDIS_CONNECT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.connect_timeout),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }
}

/// Redis-backed blob store.
///
/// Uses connection manager for automatic reconnection.
pub struct RedisBlobStore {
    conn: ConnectionManager,
    config: RedisConfig,
}

impl RedisBlobStore {
    pub async fn new(config: RedisConfig) -> Result<Self, BlobStoreError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| BlobStoreError::Connection(e.to_string()))?;

        let conn = tokio::time::timeout(config.connect_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| BlobStoreError::Connection("Connection timed out".to_string()))?
            .map_err(|e| BlobStoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.url, "Connected to Redis blob store");

        Ok(Self { conn, config })
    }

    /// Create from environment configuration.
    pub async fn from_env() -> Result<Self, BlobStoreError> {
        Self::new(RedisConfig::from_env()).await
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl BlobStore for RedisBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<Vec<u8>>>(self.key(key))
            .await
            .map_err(|e| BlobStoreError::Operation(e.to_string()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), BlobStoreError> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(self.key(key), value)
            .await
            .map_err(|e| BlobStoreError::Operation(e.to_string()))
    }
}
