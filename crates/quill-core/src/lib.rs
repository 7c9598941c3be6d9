//! # Quill Core
//!
//! The domain layer of Quill.
//! This crate owns the post collection, its derived fields and the search logic.
//! Storage backends live behind the [`ports::BlobStore`] trait.

pub mod domain;
pub mod error;
pub mod ports;
pub mod search;
pub mod store;
pub mod text;

pub use error::{DomainError, StoreError};
pub use store::{PostStore, StoreConfig};
