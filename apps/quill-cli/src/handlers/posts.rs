use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use quill_core::domain::{Post, PostDraft, PostId};
use quill_core::search::SearchState;
use quill_core::{DomainError, StoreError};
use quill_shared::{PostDetail, PostSummary};

use crate::print::{print_detail, print_json, print_summaries};
use crate::state::AppState;

/// Raw field values from the add and edit commands.
#[derive(Debug, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image: Option<String>,
    pub clear_image: bool,
}

impl PostInput {
    /// Fill missing fields from `current` and validate.
    fn into_draft(self, current: Option<&PostDraft>) -> Result<PostDraft, DomainError> {
        let pick = |new: Option<String>, old: Option<&str>| {
            new.unwrap_or_else(|| old.unwrap_or_default().to_string())
        };

        let title = pick(self.title, current.map(PostDraft::title));
        let content = pick(self.content, current.map(PostDraft::content));
        let author = pick(self.author, current.map(PostDraft::author));
        let image = if self.clear_image {
            None
        } else {
            self.image
                .or_else(|| current.and_then(PostDraft::image).map(str::to_string))
        };

        PostDraft::new(title, content, author, image.as_deref())
    }
}

pub fn read_content(
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> anyhow::Result<Option<String>> {
    match content_file {
        Some(path) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read content from {}", path.display())),
        None => Ok(content),
    }
}

pub fn list(
    state: &AppState,
    query: Option<String>,
    author: Option<String>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut search = SearchState::default();
    if let Some(query) = query {
        search.set_term(query, Instant::now());
        search.apply_now();
    }
    search.set_author(author);

    let words_per_minute = state.config.words_per_minute;
    let summaries: Vec<PostSummary> = search
        .filtered(state.store.posts())
        .into_iter()
        .map(|post| PostSummary::from_post(post, words_per_minute))
        .collect();

    if json {
        print_json(out, &summaries)
    } else {
        print_summaries(out, &summaries)
    }
}

pub fn authors(state: &AppState, out: &mut impl Write) -> anyhow::Result<()> {
    let search = SearchState::default();
    for author in search.authors(state.store.posts()) {
        writeln!(out, "{author}")?;
    }
    Ok(())
}

pub async fn add(state: &mut AppState, input: PostInput, out: &mut impl Write) -> anyhow::Result<()> {
    ensure_loaded(state)?;
    let draft = input.into_draft(None)?;
    let post = state.store.create(draft).await;

    writeln!(out, "Created post {} at /blog/{}", post.id(), post.slug())?;
    if post.slug().is_empty() {
        tracing::warn!(post_id = %post.id(), "Title has no URL-safe characters, use the id to reach this post");
    }
    warn_if_shadowed(state, &post);
    ensure_saved(state)
}

pub async fn edit(
    state: &mut AppState,
    id: PostId,
    input: PostInput,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    ensure_loaded(state)?;
    let current = state
        .store
        .get_by_id(id)
        .map(PostDraft::from)
        .ok_or_else(|| not_found(id))?;
    let draft = input.into_draft(Some(&current))?;

    let post = state.store.update(id, draft).await.ok_or_else(|| not_found(id))?;

    writeln!(out, "Updated post {} at /blog/{}", post.id(), post.slug())?;
    warn_if_shadowed(state, &post);
    ensure_saved(state)
}

/// Show a post by slug; a numeric argument falls back to lookup by id.
pub fn show(state: &AppState, slug: &str, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let post = state
        .store
        .get_by_slug(slug)
        .or_else(|| slug.parse().ok().and_then(|id| state.store.get_by_id(id)))
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "post",
            key: slug.to_string(),
        })?;

    let detail = PostDetail::from_post(post, state.config.words_per_minute);
    if json {
        print_json(out, &detail)?;
    } else {
        print_detail(out, &detail)?;
    }

    warn_if_shadowed(state, post);
    Ok(())
}

pub async fn delete(
    state: &mut AppState,
    id: PostId,
    confirm: impl FnOnce(&Post) -> anyhow::Result<bool>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    ensure_loaded(state)?;
    let post = state.store.get_by_id(id).ok_or_else(|| not_found(id))?;
    if !confirm(post)? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
    }

    if let Some(removed) = state.store.delete(id).await {
        writeln!(out, "Deleted \"{}\"", removed.title())?;
    }
    ensure_saved(state)
}

fn not_found(id: PostId) -> DomainError {
    DomainError::NotFound {
        entity_type: "post",
        key: id.to_string(),
    }
}

/// Writing after a failed load would replace the unreadable data with an empty list.
fn ensure_loaded(state: &AppState) -> anyhow::Result<()> {
    match state.store.error() {
        Some(err @ StoreError::Load(_)) => {
            anyhow::bail!("{err}; refusing to modify posts until the saved data is readable")
        }
        _ => Ok(()),
    }
}

fn ensure_saved(state: &AppState) -> anyhow::Result<()> {
    if !state.store.has_unsaved_changes() {
        return Ok(());
    }
    match state.store.error() {
        Some(err) => anyhow::bail!("{err}; the change was not saved"),
        None => anyhow::bail!("the change was not saved"),
    }
}

fn warn_if_shadowed(state: &AppState, post: &Post) {
    if post.slug().is_empty() {
        return;
    }
    let sharing = state.store.find_all_by_slug(post.slug());
    if sharing.len() > 1 {
        let ids: Vec<String> = sharing.iter().map(|p| p.id().to_string()).collect();
        tracing::warn!(
            slug = %post.slug(),
            ids = %ids.join(", "),
            "Several posts share this slug; /blog/{} shows the first",
            post.slug()
        );
    }
}
