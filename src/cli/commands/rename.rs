//! Filename normalization pass: cleans names, writes nothing else.

use anyhow::Context;
use std::path::Path;

use crate::normalize::normalize;
use crate::runner::list_audio_files;

/// Clean every audio filename in a folder. No network, no tag writes.
pub fn cmd_rename(path: &Path, dry_run: bool) -> anyhow::Result<()> {
    anyhow::ensure!(path.is_dir(), "not a folder: {}", path.display());

    let files = list_audio_files(path).context("Failed to list folder")?;

    let mut renamed = 0usize;
    let mut skipped: Vec<String> = Vec::new();

    for file in files {
        let name = file
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let normalized = normalize(&name);
        if normalized.file_name == name {
            continue;
        }

        if dry_run {
            println!("{} -> {}", name, normalized.file_name);
            renamed += 1;
            continue;
        }

        let target = file.with_file_name(&normalized.file_name);
        if target.exists() {
            skipped.push(format!("{name} (target already exists)"));
            continue;
        }
        match std::fs::rename(&file, &target) {
            Ok(()) => {
                println!("{} -> {}", name, normalized.file_name);
                renamed += 1;
            }
            Err(e) => skipped.push(format!("{name} ({e})")),
        }
    }

    if dry_run {
        println!("\n{renamed} file(s) would be renamed.");
    } else {
        println!("\n{renamed} file(s) renamed.");
    }
    if !skipped.is_empty() {
        println!("Skipped:");
        for entry in &skipped {
            println!("  - {entry}");
        }
    }
    Ok(())
}
