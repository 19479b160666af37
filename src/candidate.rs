//! Discovered projects and their deletion lifecycle.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::strategy::RiskLevel;

/// Where a candidate is in the deletion lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum DeletionStatus {
    Pending,
    Deleting,
    Succeeded,
    Failed(String),
}

impl DeletionStatus {
    pub fn is_deleting(&self) -> bool {
        matches!(self, DeletionStatus::Deleting)
    }
}

impl fmt::Display for DeletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionStatus::Pending => f.write_str("pending"),
            DeletionStatus::Deleting => f.write_str("deleting"),
            DeletionStatus::Succeeded => f.write_str("deleted"),
            DeletionStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A directory classified as a project root with reclaimable artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCandidate {
    /// Canonical project root. Unique within a scan.
    pub path: PathBuf,
    /// Name of the strategy that classified this root.
    pub strategy: String,
    pub risk: RiskLevel,
    /// Existing target directories found when the root was classified.
    pub targets: Vec<PathBuf>,
    /// Total bytes under `targets`; `None` until sizing finishes.
    pub size: Option<u64>,
    pub selected: bool,
    pub status: DeletionStatus,
}

impl ProjectCandidate {
    pub fn new(path: PathBuf, strategy: &str, risk: RiskLevel, targets: Vec<PathBuf>) -> Self {
        Self {
            path,
            strategy: strategy.to_string(),
            risk,
            targets,
            size: None,
            selected: false,
            status: DeletionStatus::Pending,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Last path component, for compact display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Snapshot of the paths a deletion of this candidate may touch.
    pub fn deletion_target(&self) -> DeletionTarget {
        DeletionTarget {
            root: self.path.clone(),
            targets: self.targets.clone(),
            risk: self.risk,
            size: self.size,
        }
    }
}

/// An owned, frozen description of one candidate's deletion.
///
/// Built from a candidate at confirmation time; the deletion executor only
/// ever sees these, never the live candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionTarget {
    pub root: PathBuf,
    pub targets: Vec<PathBuf>,
    pub risk: RiskLevel,
    pub size: Option<u64>,
}

impl DeletionTarget {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_creation() {
        let candidate = ProjectCandidate::new(
            PathBuf::from("/code/app"),
            "Rust",
            RiskLevel::Low,
            vec![PathBuf::from("/code/app/target")],
        );

        assert_eq!(candidate.strategy, "Rust");
        assert_eq!(candidate.size, None);
        assert!(!candidate.selected);
        assert_eq!(candidate.status, DeletionStatus::Pending);
        assert_eq!(candidate.name(), "app");
    }

    #[test]
    fn test_deletion_target_is_a_copy() {
        let mut candidate = ProjectCandidate::new(
            PathBuf::from("/code/app"),
            "Rust",
            RiskLevel::Low,
            vec![PathBuf::from("/code/app/target")],
        )
        .with_size(42);

        let frozen = candidate.deletion_target();
        candidate.targets.push(PathBuf::from("/code/app/other"));

        assert_eq!(frozen.targets, vec![PathBuf::from("/code/app/target")]);
        assert_eq!(frozen.size, Some(42));
        assert_eq!(frozen.root(), Path::new("/code/app"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DeletionStatus::Deleting.to_string(), "deleting");
        assert_eq!(
            DeletionStatus::Failed("permission denied".into()).to_string(),
            "failed: permission denied"
        );
    }
}
