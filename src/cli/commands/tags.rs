//! Manual tag writing for a single file, under the same merge policy the
//! batch pipeline uses.

use anyhow::Context;
use std::path::Path;

use crate::enrichment::domain::MetadataRecord;
use crate::metadata::merge::{MergePolicy, merge};
use crate::metadata::{LoftyTagStore, TagStore};

/// Merge CLI-supplied facets into one file's tags.
pub fn cmd_write_tags(
    path: &Path,
    title: Option<&str>,
    artist: Option<&str>,
    album: Option<&str>,
    year: Option<u32>,
    genre: Option<&str>,
    overwrite: bool,
) -> anyhow::Result<()> {
    let record = MetadataRecord {
        title: title.map(String::from),
        artist: artist.map(String::from),
        album: album.map(String::from),
        year,
        genre: genre.map(String::from),
        ..Default::default()
    };
    anyhow::ensure!(!record.is_empty(), "nothing to write, pass at least one field");

    let policy = if overwrite {
        MergePolicy::overwrite_all()
    } else {
        MergePolicy::default()
    };

    let store = LoftyTagStore;
    let existing = store.read_tags(path).context("Failed to read tags")?;
    let (merged, outcome) = merge(&record, &existing, &policy);

    if !outcome.changed {
        println!("No changes: every requested field is already set.");
        if !outcome.fields_skipped.is_empty() {
            println!("  Kept: {}", outcome.fields_skipped.join(", "));
        }
        return Ok(());
    }

    store
        .write_tags(path, &merged)
        .context("Failed to write tags")?;

    println!(
        "Tags written to {} ({} field(s) updated)",
        path.display(),
        outcome.fields_updated.len()
    );
    if !outcome.fields_skipped.is_empty() {
        println!("  Kept: {}", outcome.fields_skipped.join(", "));
    }
    Ok(())
}
