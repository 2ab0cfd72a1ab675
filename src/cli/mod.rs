pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "broadsheet")]
#[command(about = "A terminal news reader", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/broadsheet/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Serve the built-in articles only, never contact the content API
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the home feed, featured article first
    Feed {
        /// Only show articles in this category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
    /// Load an article by slug or id and print it
    Read {
        /// Slug or id of the article
        id: String,

        /// Print the share message instead of the article
        #[arg(long)]
        share: bool,
    },
    /// Render an article document from a JSON file
    Render {
        /// Path to the JSON document
        path: PathBuf,
    },
    /// Launch the TUI
    Tui,
}
