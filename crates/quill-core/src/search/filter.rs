use std::collections::BTreeSet;

use crate::domain::Post;

/// Post field a text query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Content,
    Author,
    Slug,
    Image,
}

impl SearchField {
    /// Fields searched unless configured otherwise.
    pub const DEFAULT: [SearchField; 3] = [Self::Title, Self::Content, Self::Author];

    fn value(self, post: &Post) -> Option<&str> {
        match self {
            Self::Title => Some(post.title()),
            Self::Content => Some(post.content()),
            Self::Author => Some(post.author()),
            Self::Slug => Some(post.slug()),
            Self::Image => post.image(),
        }
    }
}

/// Filter `posts` by exact author and by a case-insensitive substring query.
///
/// An empty author or a blank query disables that step. Order is preserved.
pub fn filter_posts<'a>(
    posts: &'a [Post],
    query: &str,
    author: Option<&str>,
    fields: &[SearchField],
) -> Vec<&'a Post> {
    let author = author.filter(|author| !author.is_empty());
    let needle = (!query.trim().is_empty()).then(|| query.to_lowercase());

    posts
        .iter()
        .filter(|post| author.is_none_or(|author| post.author() == author))
        .filter(|post| match &needle {
            Some(needle) => fields.iter().any(|field| {
                field
                    .value(post)
                    .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
            }),
            None => true,
        })
        .collect()
}

/// Authors present in `posts`, deduplicated and sorted.
pub fn distinct_authors(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(Post::author)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
