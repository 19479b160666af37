//! Concurrent project traversal.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;
use rayon::{Scope, ThreadPool};

use crate::candidate::ProjectCandidate;
use crate::strategy::{CleaningStrategy, StrategyRegistry};

use super::event::{ScanEvent, ScanSummary};
use super::options::ScanOptions;
use super::size::targets_size;
use super::token::CancellationToken;

/// Shared state of one traversal run. Every visit and sizing task borrows it.
pub(crate) struct Walker<'a> {
    registry: &'a StrategyRegistry,
    options: &'a ScanOptions,
    tx: Sender<ScanEvent>,
    token: CancellationToken,
    abort: CancellationToken,
    directories: AtomicU64,
    errors: AtomicU64,
}

impl<'a> Walker<'a> {
    /// `token` stops discovery. `abort` additionally stops sizing of
    /// candidates that were already sent.
    pub(crate) fn new(
        registry: &'a StrategyRegistry,
        options: &'a ScanOptions,
        tx: Sender<ScanEvent>,
        token: CancellationToken,
        abort: CancellationToken,
    ) -> Self {
        Self {
            registry,
            options,
            tx,
            token,
            abort,
            directories: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    /// Walk `root` on `pool` and block until every visit and sizing task has
    /// finished, then send the closing `ScanComplete`.
    pub(crate) fn run(&self, pool: &ThreadPool, root: PathBuf) -> ScanSummary {
        pool.scope(|scope| self.visit(scope, root, 0));

        let summary = ScanSummary {
            cancelled: self.token.is_cancelled(),
            directories: self.directories.load(Ordering::SeqCst),
            errors: self.errors.load(Ordering::SeqCst),
        };

        // The receiver may already be gone; nobody is left to tell.
        let _ = self.tx.send(ScanEvent::ScanComplete(summary));
        summary
    }

    fn visit<'s>(&'s self, scope: &Scope<'s>, dir: PathBuf, depth: usize) {
        if self.token.is_cancelled() {
            return;
        }
        self.directories.fetch_add(1, Ordering::SeqCst);

        // A project root is never descended into
        if let Some(strategy) = self.registry.classify(&dir) {
            self.claim(scope, dir, strategy);
            return;
        }

        if let Some(max_depth) = self.options.max_depth {
            if depth >= max_depth {
                return;
            }
        }

        let read_dir = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(err) => {
                self.report_error(&dir, err.to_string());
                return;
            }
        };

        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    self.report_error(&dir, err.to_string());
                    continue;
                }
            };

            // DirEntry::file_type does not follow symlinks, so links never
            // count as directories here.
            let is_dir = match entry.file_type() {
                Ok(t) => t.is_dir(),
                Err(err) => {
                    self.report_error(&entry.path(), err.to_string());
                    continue;
                }
            };

            if !is_dir || self.options.is_excluded(&entry.file_name()) {
                continue;
            }

            let child = entry.path();
            scope.spawn(move |scope| self.visit(scope, child, depth + 1));
        }
    }

    /// Emit a candidate for a classified root and queue its sizing.
    fn claim<'s>(&'s self, scope: &Scope<'s>, dir: PathBuf, strategy: &dyn CleaningStrategy) {
        let targets = strategy.targets(&dir);
        if targets.is_empty() {
            tracing::debug!(path = %dir.display(), strategy = strategy.name(), "Project has nothing to reclaim");
            return;
        }

        let candidate =
            ProjectCandidate::new(dir.clone(), strategy.name(), strategy.risk_level(), targets.clone());
        if !self.emit(ScanEvent::CandidateDiscovered(candidate)) {
            return;
        }

        // Sizing of a sent candidate outlives a plain cancel
        scope.spawn(move |_| {
            if let Some(bytes) = targets_size(&targets, &self.abort) {
                self.send(ScanEvent::CandidateSized { path: dir, bytes });
            }
        });
    }

    fn report_error(&self, path: &Path, reason: String) {
        tracing::debug!(path = %path.display(), %reason, "Skipping unreadable directory");
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.emit(ScanEvent::DirectoryError {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Send an event unless the scan is cancelled.
    fn emit(&self, event: ScanEvent) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.send(event)
    }

    /// Send an event unless the scan is aborted. Blocks while the channel
    /// is full. A closed channel aborts the scan.
    fn send(&self, event: ScanEvent) -> bool {
        if self.abort.is_cancelled() {
            return false;
        }
        if self.tx.send(event).is_err() {
            self.token.cancel();
            self.abort.cancel();
            return false;
        }
        true
    }
}
