//! The full batch pipeline: normalize → resolve → merge → persist.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Runtime;

use crate::config;
use crate::enrichment::Resolver;
use crate::metadata::LoftyTagStore;
use crate::metadata::merge::MergePolicy;
use crate::runner::report::RunReport;
use crate::runner::{BatchOptions, BatchRunner};

/// Process a folder of audio files and print the run report.
pub fn cmd_fix(
    rt: &Runtime,
    path: &Path,
    genius_token: Option<&str>,
    dry_run: bool,
    parallel: Option<usize>,
    overwrite: bool,
) -> anyhow::Result<()> {
    let mut config = config::load();
    if let Some(token) = genius_token {
        config.credentials.genius_api_token = Some(token.to_string());
    }

    let policy = if overwrite {
        MergePolicy::overwrite_all()
    } else {
        MergePolicy::from_config(&config.merge)
    };
    let options = BatchOptions {
        dry_run,
        parallelism: parallel.unwrap_or(config.batch.parallelism),
    };

    let resolver = Resolver::from_config(&config);
    let cancel = Arc::new(AtomicBool::new(false));
    let runner = BatchRunner::new(resolver, LoftyTagStore, policy, options)
        .with_cancel_flag(cancel.clone());

    if dry_run {
        println!("DRY RUN - no changes will be made\n");
    }

    let report = rt.block_on(async {
        // Ctrl-C stops the run at the next file boundary; in-flight files
        // finish and the partial report is still printed.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupt received, finishing in-flight files...");
                cancel.store(true, Ordering::Relaxed);
            }
        });

        runner.run(path).await
    })?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Processed tracks: {}", report.processed);
    println!("Renamed files:    {}", report.renamed);
    println!("Tags updated:     {}", report.tags_updated);
    println!("Covers added:     {}", report.covers_added);
    println!("Lyrics added:     {}", report.lyrics_added);

    if report.has_problems() {
        println!("\nProblem files:");
        for problem in &report.problems {
            println!("  - {}: {}", problem.file, problem.reason);
        }
    }
}
