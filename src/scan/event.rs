use std::path::PathBuf;

use crate::candidate::ProjectCandidate;

/// Events flowing from traversal workers to the single consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A project root was classified. Its size is still pending.
    CandidateDiscovered(ProjectCandidate),
    /// Size aggregation for a previously discovered candidate finished.
    CandidateSized { path: PathBuf, bytes: u64 },
    /// A directory could not be read and was skipped.
    DirectoryError { path: PathBuf, reason: String },
    /// Always the last event of a session.
    ScanComplete(ScanSummary),
}

/// Totals reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub cancelled: bool,
    pub directories: u64,
    pub errors: u64,
}
