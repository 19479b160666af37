//! Removal of confirmed deletion targets.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use walkdir::WalkDir;

use crate::candidate::DeletionTarget;
use crate::error::DeletionError;
use crate::scan::{dir_size, CancellationToken};

/// Options for the deletion executor.
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// If true, report sizes without removing anything.
    pub dry_run: bool,
}

/// Result of deleting one candidate's targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// The candidate root this outcome belongs to.
    pub path: PathBuf,
    /// Targets no longer on disk after this attempt, including ones that
    /// were already gone.
    pub removed: Vec<PathBuf>,
    /// Bytes freed by `removed`, also when another target failed.
    pub freed: u64,
    /// Bytes freed, or the first failure hit among the targets.
    pub result: Result<u64, DeletionError>,
}

impl DeletionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Deletes frozen targets, one candidate at a time.
#[derive(Debug, Clone, Default)]
pub struct DeletionExecutor {
    options: DeleteOptions,
}

impl DeletionExecutor {
    pub fn new(options: DeleteOptions) -> Self {
        Self { options }
    }

    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Delete every item, in order. A failing item never stops the batch.
    pub fn delete(&self, items: &[DeletionTarget]) -> Vec<DeletionOutcome> {
        items.iter().map(|item| self.delete_one(item)).collect()
    }

    /// Run the batch on its own thread, sending one outcome per item.
    ///
    /// Stops early only if the receiver goes away.
    pub fn delete_in_background(
        &self,
        items: Vec<DeletionTarget>,
        tx: Sender<DeletionOutcome>,
    ) -> std::io::Result<JoinHandle<()>> {
        let executor = self.clone();
        thread::Builder::new()
            .name("spektr-delete".to_string())
            .spawn(move || {
                for item in &items {
                    if tx.send(executor.delete_one(item)).is_err() {
                        tracing::debug!("Deletion receiver closed, stopping batch");
                        break;
                    }
                }
            })
    }

    /// Remove all targets of one candidate.
    ///
    /// Remaining targets are still attempted after a failure; the first
    /// error is the one reported. Targets removed along the way, and ones
    /// found already gone, are listed in `removed` either way.
    pub fn delete_one(&self, item: &DeletionTarget) -> DeletionOutcome {
        let mut freed = 0u64;
        let mut removed = Vec::new();
        let mut first_error = None;

        for target in &item.targets {
            match self.remove_target(item.root(), target) {
                Ok(bytes) => {
                    freed += bytes;
                    removed.push(target.clone());
                }
                Err(err) => {
                    tracing::warn!(path = %target.display(), error = %err, "Failed to delete target");
                    if matches!(err, DeletionError::AlreadyRemoved(_)) {
                        removed.push(target.clone());
                    }
                    first_error.get_or_insert(err);
                }
            }
        }

        let result = match first_error {
            Some(err) => Err(err),
            None => {
                tracing::info!(
                    path = %item.root().display(),
                    bytes = freed,
                    dry_run = self.options.dry_run,
                    "Deleted artifacts"
                );
                Ok(freed)
            }
        };

        DeletionOutcome {
            path: item.root.clone(),
            removed,
            freed,
            result,
        }
    }

    fn remove_target(&self, root: &Path, target: &Path) -> Result<u64, DeletionError> {
        check_target(root, target)?;

        if self.options.dry_run {
            return Ok(dir_size(target, &CancellationToken::new()).unwrap_or(0));
        }

        remove_tree(target).map_err(|e| DeletionError::from_io(target.to_path_buf(), &e))
    }
}

/// Remove `path` bottom-up, counting file bytes on the way.
fn remove_tree(path: &Path) -> io::Result<u64> {
    let mut freed = 0u64;

    for entry in WalkDir::new(path).follow_links(false).contents_first(true) {
        let entry = entry?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            if file_type.is_file() {
                freed += entry.metadata()?.len();
            }
            fs::remove_file(entry.path())?;
        }
    }

    Ok(freed)
}

/// Safety checks run immediately before a target is removed.
fn check_target(root: &Path, target: &Path) -> Result<(), DeletionError> {
    let escapes = target
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::CurDir));
    if escapes || target == root || !target.starts_with(root) {
        return Err(DeletionError::OutsideCandidate(target.to_path_buf()));
    }

    let metadata = fs::symlink_metadata(target)
        .map_err(|e| DeletionError::from_io(target.to_path_buf(), &e))?;

    if metadata.file_type().is_symlink() {
        return Err(DeletionError::Symlink(target.to_path_buf()));
    }

    if is_mount_point(target, &metadata) {
        return Err(DeletionError::MountPoint(target.to_path_buf()));
    }

    Ok(())
}

#[cfg(unix)]
fn is_mount_point(path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;

    match path.parent().map(fs::metadata) {
        Some(Ok(parent)) => parent.dev() != metadata.dev(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_mount_point(_path: &Path, _metadata: &fs::Metadata) -> bool {
    false
}
