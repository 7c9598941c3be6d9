//! Plain-text and JSON rendering of posts.

use std::io::Write;

use quill_shared::{PostDetail, PostSummary};
use serde::Serialize;

pub fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn print_summaries(out: &mut impl Write, posts: &[PostSummary]) -> anyhow::Result<()> {
    if posts.is_empty() {
        writeln!(out, "No posts found.")?;
        return Ok(());
    }

    for post in posts {
        writeln!(out, "[{}] {}", post.id, post.title)?;
        writeln!(
            out,
            "    {} · {} · {} min read · /blog/{}",
            post.author, post.published, post.reading_minutes, post.slug
        )?;
        writeln!(out, "    {}", post.excerpt)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_detail(out: &mut impl Write, post: &PostDetail) -> anyhow::Result<()> {
    writeln!(out, "{}", post.title)?;
    writeln!(out, "{}", "=".repeat(post.title.chars().count()))?;
    writeln!(
        out,
        "By {} · {} · {} min read",
        post.author, post.published, post.reading_minutes
    )?;
    if let Some(image) = &post.image {
        writeln!(out, "Image: {image}")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", post.content)?;
    writeln!(out)?;
    writeln!(out, "Edit: quill edit {}   ({})", post.id, post.edit_path)?;
    Ok(())
}
