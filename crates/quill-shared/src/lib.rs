//! # Quill Shared
//!
//! View models handed to front ends: list cards and the detail page.
//! They are plain serializable data derived from [`quill_core::domain::Post`].

pub mod dto;

pub use dto::{PostDetail, PostSummary};
