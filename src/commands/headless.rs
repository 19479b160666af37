//! Headless report: scan, print every candidate, summarize.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::candidate::ProjectCandidate;
use crate::console::{display_size, SortMode};
use crate::scan::{ScanOptions, ScanSession};
use crate::strategy::StrategyRegistry;

#[derive(Debug, Serialize)]
struct Report {
    root: PathBuf,
    candidates: Vec<ProjectCandidate>,
    total_bytes: u64,
    errors: Vec<DirectoryError>,
    cancelled: bool,
}

#[derive(Debug, Serialize)]
struct DirectoryError {
    path: PathBuf,
    reason: String,
}

/// Run a full scan and print the report to stdout.
pub fn run(
    root: &std::path::Path,
    registry: Arc<StrategyRegistry>,
    options: ScanOptions,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let session = ScanSession::start(root, registry, options)?;
    let progress = spinner(quiet || json)?;

    let mut candidates = session.candidates();
    let mut found: Vec<ProjectCandidate> = Vec::new();
    for candidate in candidates.by_ref() {
        progress.set_message(format!("{} project(s), last: {}", found.len() + 1, candidate.name()));
        found.push(candidate);
    }
    progress.finish_and_clear();

    found.sort_by(|a, b| SortMode::SizeDesc.compare(a, b));

    let report = Report {
        root: candidates.root().to_path_buf(),
        total_bytes: found.iter().filter_map(|c| c.size).sum(),
        candidates: found,
        errors: candidates
            .errors()
            .iter()
            .map(|(path, reason)| DirectoryError {
                path: path.clone(),
                reason: reason.clone(),
            })
            .collect(),
        cancelled: candidates.summary().map(|s| s.cancelled).unwrap_or(false),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn spinner(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    progress.set_message("Scanning...");
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}

fn print_report(report: &Report) {
    for candidate in &report.candidates {
        println!(
            "{} | {} | {}",
            candidate.strategy,
            candidate.path.display(),
            display_size(candidate.size)
        );
    }

    if !report.candidates.is_empty() {
        println!();
    }
    println!(
        "Found {} project{}, {} reclaimable, {} unreadable director{}",
        report.candidates.len(),
        if report.candidates.len() == 1 { "" } else { "s" },
        display_size(Some(report.total_bytes)),
        report.errors.len(),
        if report.errors.len() == 1 { "y" } else { "ies" }
    );

    for error in &report.errors {
        eprintln!("  Skipped {}: {}", error.path.display(), error.reason);
    }
}
