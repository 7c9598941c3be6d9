//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use clap::ValueEnum;
use quill_core::StoreConfig;
use quill_core::store::DEFAULT_STORAGE_KEY;
use quill_core::text::DEFAULT_WORDS_PER_MINUTE;

/// Where the post collection is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StorageBackend {
    /// JSON file under the data directory
    #[default]
    File,
    /// Process memory, gone when quill exits
    Memory,
    /// Redis server at REDIS_URL
    Redis,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub words_per_minute: u32,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage = match lookup("QUILL_STORAGE") {
            Some(value) => StorageBackend::from_str(&value, true).unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Unknown QUILL_STORAGE, using file storage");
                StorageBackend::File
            }),
            None => StorageBackend::File,
        };

        Self {
            storage,
            data_dir: lookup("QUILL_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".quill")),
            storage_key: lookup("QUILL_STORAGE_KEY")
                .filter(|key| !key.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            words_per_minute: lookup("QUILL_WORDS_PER_MINUTE")
                .and_then(|s| s.parse().ok())
                .filter(|wpm| *wpm > 0)
                .unwrap_or(DEFAULT_WORDS_PER_MINUTE),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, storage: Option<StorageBackend>, data_dir: Option<PathBuf>) -> Self {
        if let Some(storage) = storage {
            self.storage = storage;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            storage_key: self.storage_key.clone(),
        }
    }
}
