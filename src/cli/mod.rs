//! Command-line interface for tagfill.
//!
//! This module provides the CLI commands for fixing folders, renaming
//! files, looking up metadata and writing tags.

mod commands;

pub use commands::{Cli, Commands, run_command};
