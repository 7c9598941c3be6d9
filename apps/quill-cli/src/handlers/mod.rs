//! Command handlers and dispatch.

mod posts;

use std::io::{self, BufRead, Write};

use crate::args::Commands;
use crate::state::AppState;

/// Run one command against the loaded store.
pub async fn run(state: &mut AppState, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::List {
            query,
            author,
            json,
        } => posts::list(state, query, author, json, out),
        Commands::Authors => posts::authors(state, out),
        Commands::Add {
            title,
            content,
            content_file,
            author,
            image,
        } => {
            let content = posts::read_content(content, content_file)?.unwrap_or_default();
            let input = posts::PostInput {
                title: Some(title),
                content: Some(content),
                author: Some(author),
                image,
                clear_image: false,
            };
            posts::add(state, input, out).await
        }
        Commands::Edit {
            id,
            title,
            content,
            content_file,
            author,
            image,
            clear_image,
        } => {
            let input = posts::PostInput {
                title,
                content: posts::read_content(content, content_file)?,
                author,
                image,
                clear_image,
            };
            posts::edit(state, id, input, out).await
        }
        Commands::Show { slug, json } => posts::show(state, &slug, json, out),
        Commands::Delete { id, yes } => {
            posts::delete(state, id, |post| Ok(yes || confirm_delete(post.title())?), out).await
        }
    }
}

fn confirm_delete(title: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "Delete \"{title}\"? This can't be undone. [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
