//! Domain entities - the core business objects.

mod post;
mod slug;

pub use post::{IdGenerator, Post, PostDraft, PostId};
pub use slug::generate_slug;
