use std::path::PathBuf;

use humansize::{format_size, BINARY};

use crate::candidate::DeletionStatus;
use crate::strategy::RiskLevel;

use super::order::SortMode;

/// Snapshot of everything the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleView {
    pub root: PathBuf,
    /// Rows of the current page, in display order.
    pub rows: Vec<RowView>,
    /// Index of the focused row within `rows`.
    pub cursor: usize,
    pub page: usize,
    pub page_count: usize,
    /// Candidates passing the filter.
    pub visible_count: usize,
    pub candidate_count: usize,
    pub selected_count: usize,
    pub selected_bytes: u64,
    /// Sum of known sizes across all candidates.
    pub total_bytes: u64,
    pub reclaimed_bytes: u64,
    pub filter: String,
    pub sort: SortMode,
    pub scanning: bool,
    pub error_count: usize,
    pub status: Option<String>,
    pub confirmation: Option<ConfirmationView>,
}

impl ConsoleView {
    pub fn focused(&self) -> Option<&RowView> {
        self.rows.get(self.cursor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub path: PathBuf,
    pub name: String,
    pub strategy: String,
    pub risk: RiskLevel,
    pub targets: Vec<PathBuf>,
    pub size: Option<u64>,
    pub selected: bool,
    pub status: DeletionStatus,
}

/// The frozen batch awaiting a yes/no.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
    pub paths: Vec<PathBuf>,
    pub total_bytes: u64,
    pub max_risk: RiskLevel,
}

/// Human-readable size; `…` while sizing is still running.
pub fn display_size(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format_size(bytes, BINARY),
        None => "…".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_size() {
        assert_eq!(display_size(Some(0)), "0 B");
        assert_eq!(display_size(Some(2048)), "2 KiB");
        assert_eq!(display_size(None), "…");
    }
}
