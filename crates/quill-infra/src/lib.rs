//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, file and in-memory storage only
//! - `redis` - Redis-backed blob store

pub mod blob;

pub use blob::{FileBlobStore, InMemoryBlobStore};

#[cfg(feature = "redis")]
pub use blob::{RedisBlobStore, RedisConfig};
