use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keep a folder of markdown files in sync with the posts of a Halo blog.
///
/// The folder must contain exactly one `halo.json` with `blog_url`, `app_id`
/// and `app_secret`. A file `<title>.md` is linked to the post titled
/// `<title>`.
#[derive(Parser, Debug)]
#[command(name = "halo-sync", version)]
pub struct Cli {
    /// Workspace folder holding the markdown files and halo.json
    #[arg(short, long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// How often files are checked for changes in watch mode
    #[arg(long, global = true, default_value_t = 500)]
    pub poll_interval_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Load and validate halo.json
    CheckConfig,
    /// Discard the loaded config and read halo.json again
    ReloadConfig,
    /// Pick a post from the blog and pull it
    List,
    /// Write a post into <title>.md in the workspace
    Pull {
        /// Post id
        id: i64,
    },
    /// Replace a post's content with a local file
    Push {
        /// Markdown file named after the post title
        file: PathBuf,
    },
    /// Publish the post linked to a local file
    Publish {
        /// Markdown file named after the post title
        file: PathBuf,
    },
    /// Push markdown files whenever they are saved, until interrupted
    Watch,
}
