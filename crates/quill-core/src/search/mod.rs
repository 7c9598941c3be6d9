//! Search and author filtering over the post collection.
//!
//! [`filter_posts`] is the pure filter; [`SearchState`] adds the typed term,
//! its debounced counterpart and the selected author on top of it.

mod debounce;
mod filter;
mod state;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::{SearchField, distinct_authors, filter_posts};
pub use state::SearchState;
