use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug::generate_slug;
use crate::error::DomainError;

/// Post identifier - creation time in milliseconds, kept unique by [`IdGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Issues post ids from the wall clock.
///
/// Two creations inside the same millisecond would collide on the raw
/// timestamp, so every id is at least one past the previous one.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the id for a post created at `now`.
    ///
    /// Returns `None` once `u64::MAX` has been issued or observed.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> Option<PostId> {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.checked_add(1)?);
        self.last = id;
        Some(PostId(id))
    }

    /// Record an id that already exists so it is never issued again.
    pub fn observe(&mut self, id: PostId) {
        self.last = self.last.max(id.0);
    }
}

/// Caller-supplied post fields, trimmed and checked for blanks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
    author: String,
    image: Option<String>,
}

impl PostDraft {
    /// Build a draft from raw form input.
    ///
    /// Title, content and author are required; a blank image means no image.
    pub fn new(
        title: impl AsRef<str>,
        content: impl AsRef<str>,
        author: impl AsRef<str>,
        image: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: required("title", title.as_ref())?,
            content: required("content", content.as_ref())?,
            author: required("author", author.as_ref())?,
            image: image
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

fn required(field: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            image: post.image.clone(),
        }
    }
}

/// Post entity - a single blog article.
///
/// Fields are read-only outside this crate; the slug always follows the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SavedPost")]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    slug: String,
    created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(id: PostId, draft: PostDraft, created_at: DateTime<Utc>) -> Self {
        let slug = generate_slug(&draft.title);
        Self {
            id,
            title: draft.title,
            content: draft.content,
            author: draft.author,
            image: draft.image,
            slug,
            created_at,
        }
    }

    /// Replace the editable fields. Id and creation time are kept.
    pub(crate) fn apply(&mut self, draft: PostDraft) {
        self.slug = generate_slug(&draft.title);
        self.title = draft.title;
        self.content = draft.content;
        self.author = draft.author;
        self.image = draft.image;
    }

    /// Recompute the slug from the title, returning `true` if it changed.
    pub(crate) fn resync_slug(&mut self) -> bool {
        let slug = generate_slug(&self.title);
        if slug == self.slug {
            return false;
        }
        self.slug = slug;
        true
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A post as found in storage. Older saves may lack `createdAt` or `slug`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedPost {
    id: PostId,
    title: String,
    content: String,
    author: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<SavedPost> for Post {
    fn from(saved: SavedPost) -> Self {
        // Ids are creation timestamps, so they stand in for a missing date.
        let created_at = saved
            .created_at
            .or_else(|| {
                i64::try_from(saved.id.get())
                    .ok()
                    .and_then(DateTime::from_timestamp_millis)
            })
            .unwrap_or_else(Utc::now);

        Self {
            id: saved.id,
            title: saved.title,
            content: saved.content,
            author: saved.author,
            image: saved.image,
            slug: saved.slug,
            created_at,
        }
    }
}
