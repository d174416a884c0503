//! tagfill - backfills tags, cover art and lyrics for a folder of audio
//! tracks.
//!
//! The pipeline per file: normalize the filename, derive an artist/title
//! identity, resolve it against external metadata providers in priority
//! order, then merge the consolidated record into the file's existing tags
//! without clobbering anything that is already there.

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod metadata;
pub mod normalize;
pub mod runner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tagfill=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
