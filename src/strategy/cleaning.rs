//! Core trait and types for project classification.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// How careful the user should be before deleting a strategy's targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Pure build output, regenerated by the next build.
    Low,
    /// Caches or environments that take a while to rebuild or may hold local tweaks.
    Medium,
    /// Rebuilding may need manual steps.
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A rule set recognizing one project family.
///
/// Implement this trait to add support for a new kind of project. A strategy:
/// - decides whether a directory is a project root of its family
/// - names the regenerable subdirectories of such a root
/// - describes how risky and how slow it is to rebuild them
///
/// Strategies must be stateless; the scanner queries them from many
/// threads at once.
pub trait CleaningStrategy: Send + Sync {
    /// Short identifier used on the command line and in config (e.g. "rust").
    fn id(&self) -> &'static str;

    /// Display name, also the filter key in the console (e.g. "Rust").
    fn name(&self) -> &'static str;

    /// Files or directories marking a project root.
    ///
    /// The default `detect` matches if ANY of them exists.
    fn marker_files(&self) -> &'static [&'static str];

    /// Regenerable paths relative to the project root.
    fn target_dirs(&self) -> &'static [&'static str];

    fn risk_level(&self) -> RiskLevel;

    /// Rough time to regenerate the targets.
    fn rebuild_estimate(&self) -> &'static str {
        "~1-3 mins"
    }

    /// Check whether `path` is a project root of this family.
    fn detect(&self, path: &Path) -> bool {
        self.marker_files().iter().any(|f| path.join(f).exists())
    }

    /// Existing target directories under `path`.
    ///
    /// Symlinked targets are left out; deleting through a link could reach
    /// outside the project.
    fn targets(&self, path: &Path) -> Vec<PathBuf> {
        self.target_dirs()
            .iter()
            .map(|d| path.join(d))
            .filter(|p| {
                p.symlink_metadata()
                    .map(|m| m.file_type().is_dir())
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// Check whether `path` holds a file whose extension is one of `extensions`.
pub(crate) fn has_file_with_extension(path: &Path, extensions: &[&str]) -> bool {
    let Ok(entries) = std::fs::read_dir(path) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.contains(&e))
                .unwrap_or(false)
    })
}
