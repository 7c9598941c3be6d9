use std::time::{Duration, Instant};

use super::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use super::filter::{SearchField, distinct_authors, filter_posts};
use crate::domain::Post;

/// Search box and author selector state for a post list.
///
/// The typed term is applied to filtering only after the debounce delay;
/// the author selection applies immediately.
#[derive(Debug, Clone)]
pub struct SearchState {
    term: String,
    applied: String,
    author: Option<String>,
    fields: Vec<SearchField>,
    debouncer: Debouncer<String>,
}

impl SearchState {
    pub fn new(delay: Duration) -> Self {
        Self {
            term: String::new(),
            applied: String::new(),
            author: None,
            fields: SearchField::DEFAULT.to_vec(),
            debouncer: Debouncer::new(delay),
        }
    }

    /// Restrict which post fields the query is matched against.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = SearchField>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Record what the user typed; it takes effect after the quiet period.
    pub fn set_term(&mut self, term: impl Into<String>, now: Instant) {
        self.term = term.into();
        self.debouncer.push(self.term.clone(), now);
    }

    /// Apply a due term. Returns `true` when the applied term changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => self.apply(term),
            None => false,
        }
    }

    /// Apply the typed term without waiting.
    pub fn apply_now(&mut self) -> bool {
        self.debouncer.cancel();
        self.apply(self.term.clone())
    }

    fn apply(&mut self, term: String) -> bool {
        if term == self.applied {
            return false;
        }
        self.applied = term;
        true
    }

    /// Select an author; `None` or an empty name clears the filter.
    pub fn set_author(&mut self, author: Option<String>) {
        self.author = author.filter(|author| !author.is_empty());
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn applied_term(&self) -> &str {
        &self.applied
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// When the next [`tick`](Self::tick) can apply a pending term.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// `true` while the typed term has not been applied yet.
    pub fn is_searching(&self) -> bool {
        self.term != self.applied
    }

    pub fn filtered<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        filter_posts(posts, &self.applied, self.author(), &self.fields)
    }

    pub fn authors(&self, posts: &[Post]) -> Vec<String> {
        distinct_authors(posts)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
