//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fix`: the full batch pipeline over a folder
//! - `rename`: filename normalization only
//! - `lookup`: resolve one artist/title pair and print the record
//! - `tags`: manual tag writing for a single file
//! - `configure`: show or update the stored configuration

mod configure;
mod fix;
mod lookup;
mod rename;
mod tags;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

pub use configure::cmd_config;
pub use fix::cmd_fix;
pub use lookup::cmd_lookup;
pub use rename::cmd_rename;
pub use tags::cmd_write_tags;

/// tagfill CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Normalize filenames and backfill tags, cover art and lyrics for a folder
    Fix {
        /// Folder containing the audio files (not scanned recursively)
        path: PathBuf,
        /// Genius API token (or set GENIUS_API_TOKEN env var)
        #[arg(short = 't', long, env = "GENIUS_API_TOKEN")]
        genius_token: Option<String>,
        /// Show what would change without renaming or writing anything
        #[arg(long)]
        dry_run: bool,
        /// Number of files processed concurrently (defaults to the config value)
        #[arg(long)]
        parallel: Option<usize>,
        /// Overwrite populated frames instead of only filling missing ones
        #[arg(long)]
        overwrite: bool,
    },
    /// Clean noisy filenames in a folder without touching tags
    Rename {
        /// Folder containing the audio files
        path: PathBuf,
        /// Show the renames without applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// Resolve one artist/title pair against the provider chains
    Lookup {
        /// Artist name
        #[arg(long)]
        artist: Option<String>,
        /// Track title
        #[arg(long)]
        title: Option<String>,
        /// Genius API token (or set GENIUS_API_TOKEN env var)
        #[arg(short = 't', long, env = "GENIUS_API_TOKEN")]
        genius_token: Option<String>,
    },
    /// Write metadata to a single audio file
    WriteTags {
        /// Path to the audio file
        path: PathBuf,
        /// Track title
        #[arg(long)]
        title: Option<String>,
        /// Artist name
        #[arg(long)]
        artist: Option<String>,
        /// Album name
        #[arg(long)]
        album: Option<String>,
        /// Release year
        #[arg(long)]
        year: Option<u32>,
        /// Genre
        #[arg(long)]
        genre: Option<String>,
        /// Overwrite populated frames
        #[arg(long)]
        overwrite: bool,
    },
    /// Show or update the stored configuration
    Config {
        /// Store a Genius API token in the config file
        #[arg(long)]
        token: Option<String>,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Fix {
            path,
            genius_token,
            dry_run,
            parallel,
            overwrite,
        } => cmd_fix(
            &rt,
            path,
            genius_token.as_deref(),
            *dry_run,
            *parallel,
            *overwrite,
        ),
        Commands::Rename { path, dry_run } => cmd_rename(path, *dry_run),
        Commands::Lookup {
            artist,
            title,
            genius_token,
        } => cmd_lookup(&rt, artist.as_deref(), title.as_deref(), genius_token.as_deref()),
        Commands::WriteTags {
            path,
            title,
            artist,
            album,
            year,
            genre,
            overwrite,
        } => cmd_write_tags(
            path,
            title.as_deref(),
            artist.as_deref(),
            album.as_deref(),
            *year,
            genre.as_deref(),
            *overwrite,
        ),
        Commands::Config { token } => cmd_config(token.as_deref()),
    }
}
