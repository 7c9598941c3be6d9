//! Blob store implementations - file, in-memory and Redis.

mod file;
mod memory;

#[cfg(feature = "redis")]
mod redis;

pub use file::FileBlobStore;
pub use memory::InMemoryBlobStore;

#[cfg(feature = "redis")]
pub use self::redis::{RedisBlobStore, RedisConfig};
