//! Command-line surface for `quill`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quill_core::domain::PostId;

use crate::config::StorageBackend;

#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A small local blog", long_about = None)]
pub struct Cli {
    /// Storage backend (overrides QUILL_STORAGE)
    #[arg(long, global = true, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Data directory for file storage (overrides QUILL_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List posts, newest first
    List {
        /// Case-insensitive text searched in title, content and author
        #[arg(long, short)]
        query: Option<String>,
        /// Only posts by this exact author
        #[arg(long, short)]
        author: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List the authors that have posts
    Authors,
    /// Publish a new post
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, required_unless_present = "content_file")]
        content: Option<String>,
        /// Read the content from a file
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,
        #[arg(long)]
        author: String,
        /// Image URL
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit a post; omitted fields keep their current value
    Edit {
        id: PostId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        image: Option<String>,
        /// Remove the post's image
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },
    /// Show a single post by slug
    Show {
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a post
    Delete {
        id: PostId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}
