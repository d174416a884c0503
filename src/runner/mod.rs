//! Batch processing: drives the normalize → resolve → merge pipeline over
//! a folder of audio files.
//!
//! One file's failure never touches the rest of the batch: every per-file
//! error is caught, recorded against that filename in the report, and the
//! run moves on. The only batch-fatal condition is a folder path that
//! cannot be listed at all.

pub mod report;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::stream::{self, StreamExt};

use crate::enrichment::domain::TrackIdentity;
use crate::enrichment::resolver::Resolver;
use crate::metadata::merge::{MergePolicy, merge};
use crate::metadata::{TagStore, TagStoreError};
use crate::normalize::normalize;
use report::RunReport;

/// Extensions the batch runner picks up. Everything here is a format the
/// tag store can read and write.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "m4a", "wav"];

/// Check if a path has a recognized audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    ext.as_deref()
        .is_some_and(|e| AUDIO_EXTENSIONS.contains(&e))
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Count what would change without renaming or writing anything.
    pub dry_run: bool,
    /// Number of files in flight at once. 1 (the default) processes the
    /// folder strictly sequentially.
    pub parallelism: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            parallelism: 1,
        }
    }
}

/// Errors that abort a batch before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("not a folder: {0}")]
    NotAFolder(PathBuf),

    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-file fatal errors. Recorded in the report; the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not derive artist/title from tags or filename")]
    IdentityMissing,

    #[error("rename failed: {0}")]
    Rename(#[source] std::io::Error),

    #[error(transparent)]
    Store(#[from] TagStoreError),
}

/// What happened to one file that made it through the pipeline.
#[derive(Debug, Clone, Default)]
struct FileOutcome {
    renamed: bool,
    tags_updated: bool,
    cover_added: bool,
    lyrics_added: bool,
    /// Recoverable conflicts worth reporting (rename target taken,
    /// singleton slot already occupied).
    notes: Vec<String>,
}

/// Drives the per-file pipeline over a folder.
pub struct BatchRunner<S: TagStore> {
    resolver: Resolver,
    store: S,
    policy: MergePolicy,
    options: BatchOptions,
    cancel: Arc<AtomicBool>,
}

impl<S: TagStore> BatchRunner<S> {
    pub fn new(resolver: Resolver, store: S, policy: MergePolicy, options: BatchOptions) -> Self {
        Self {
            resolver,
            store,
            policy,
            options,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Install a cancellation flag. Checked at the per-file dispatch
    /// boundary: files already in flight finish, nothing new starts.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Process every audio file in the folder (non-recursive) and return
    /// the run report. The report is complete even when every file failed.
    pub async fn run(&self, folder: &Path) -> Result<RunReport, BatchError> {
        if !folder.is_dir() {
            return Err(BatchError::NotAFolder(folder.to_path_buf()));
        }
        let files = list_audio_files(folder)?;

        tracing::info!(
            folder = %folder.display(),
            files = files.len(),
            parallelism = self.options.parallelism,
            dry_run = self.options.dry_run,
            "starting batch run"
        );

        let concurrency = self.options.parallelism.max(1);
        let mut report = RunReport::default();

        // The source iterator is lazy: the cancel flag is consulted every
        // time a slot frees up and a new file would be dispatched.
        let mut outcomes = stream::iter(
            files
                .iter()
                .take_while(|_| !self.cancel.load(Ordering::Relaxed))
                .map(|path| self.process_named(path)),
        )
        .buffer_unordered(concurrency);

        while let Some((file_name, result)) = outcomes.next().await {
            absorb(&mut report, &file_name, result);
        }

        if self.cancel.load(Ordering::Relaxed) {
            tracing::warn!("batch run interrupted, report covers completed files only");
        }

        Ok(report)
    }

    /// Pair the pipeline result with the filename it is reported under.
    async fn process_named(&self, path: &Path) -> (String, Result<FileOutcome, FileError>) {
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = self.process_file(path, &file_name).await;
        (file_name, result)
    }

    /// The per-file pipeline: normalize → rename → read tags → resolve →
    /// merge → persist.
    async fn process_file(
        &self,
        path: &Path,
        file_name: &str,
    ) -> Result<FileOutcome, FileError> {
        let mut outcome = FileOutcome::default();
        let normalized = normalize(file_name);

        let mut current = path.to_path_buf();
        if normalized.file_name != file_name {
            let target = path.with_file_name(&normalized.file_name);
            if self.options.dry_run {
                outcome.renamed = true;
            } else if target.exists() {
                // Never clobber an existing file; keep working under the
                // old name.
                outcome
                    .notes
                    .push(format!("rename target already exists: {}", normalized.file_name));
            } else {
                std::fs::rename(&current, &target).map_err(FileError::Rename)?;
                tracing::info!(from = file_name, to = %normalized.file_name, "renamed");
                current = target;
                outcome.renamed = true;
            }
        }

        let existing = self.store.read_tags(&current)?;

        // Embedded tags win over the filename split for identity.
        let identity = TrackIdentity {
            artist: existing
                .artist
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| normalized.identity.artist.clone()),
            title: existing
                .title
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| normalized.identity.title.clone()),
        };
        if !identity.is_resolvable() {
            return Err(FileError::IdentityMissing);
        }

        let record = self.resolver.resolve(&identity).await;
        let (merged, merge_outcome) = merge(&record, &existing, &self.policy);

        if merge_outcome.cover_already_present {
            outcome.notes.push("cover already present".to_string());
        }
        if merge_outcome.lyrics_already_present {
            outcome.notes.push("lyrics already present".to_string());
        }

        if merge_outcome.changed && !self.options.dry_run {
            self.store.write_tags(&current, &merged)?;
        }

        outcome.tags_updated = !merge_outcome.fields_updated.is_empty();
        outcome.cover_added = merge_outcome.cover_added;
        outcome.lyrics_added = merge_outcome.lyrics_added;

        Ok(outcome)
    }
}

/// Fold one file's result into the report.
fn absorb(report: &mut RunReport, file_name: &str, result: Result<FileOutcome, FileError>) {
    match result {
        Ok(outcome) => {
            report.processed += 1;
            if outcome.renamed {
                report.renamed += 1;
            }
            if outcome.tags_updated {
                report.tags_updated += 1;
            }
            if outcome.cover_added {
                report.covers_added += 1;
            }
            if outcome.lyrics_added {
                report.lyrics_added += 1;
            }
            for note in outcome.notes {
                report.record_problem(file_name, note);
            }
        }
        Err(e) => {
            tracing::warn!(file = file_name, error = %e, "file failed, continuing batch");
            report.record_problem(file_name, e.to_string());
        }
    }
}

/// Non-recursive listing of recognized audio files, sorted by name for a
/// deterministic processing order.
pub fn list_audio_files(folder: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let entries = std::fs::read_dir(folder).map_err(|e| BatchError::List {
        path: folder.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_audio_file(p))
        .collect();
    files.sort();
    Ok(files)
}
