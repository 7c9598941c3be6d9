//! Data Transfer Objects - what the list and detail views display.

use serde::{Deserialize, Serialize};

use quill_core::domain::Post;
use quill_core::text::{calculate_reading_time, format_date, truncate_text};

/// Characters of content shown on a list card.
pub const EXCERPT_LENGTH: usize = 150;

/// A post as shown in the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub author_initial: String,
    pub excerpt: String,
    pub reading_minutes: u32,
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PostSummary {
    pub fn from_post(post: &Post, words_per_minute: u32) -> Self {
        Self {
            id: post.id().get(),
            slug: post.slug().to_string(),
            title: post.title().to_string(),
            author: post.author().to_string(),
            author_initial: author_initial(post.author()),
            excerpt: truncate_text(post.content(), EXCERPT_LENGTH),
            reading_minutes: calculate_reading_time(post.content(), words_per_minute),
            published: format_date(post.created_at()),
            image: post.image().map(str::to_string),
        }
    }
}

/// A post as shown on its own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub reading_minutes: u32,
    pub published: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Route of this page.
    pub path: String,
    /// Route of the edit form.
    pub edit_path: String,
}

impl PostDetail {
    pub fn from_post(post: &Post, words_per_minute: u32) -> Self {
        Self {
            id: post.id().get(),
            slug: post.slug().to_string(),
            title: post.title().to_string(),
            author: post.author().to_string(),
            content: post.content().to_string(),
            reading_minutes: calculate_reading_time(post.content(), words_per_minute),
            published: format_date(post.created_at()),
            created_at: post.created_at().to_rfc3339(),
            image: post.image().map(str::to_string),
            path: format!("/blog/{}", post.slug()),
            edit_path: format!("/edit-blog/{}", post.id()),
        }
    }
}

fn author_initial(author: &str) -> String {
    author
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
