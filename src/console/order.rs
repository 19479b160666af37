//! Sorting and filtering of the candidate list.

use std::cmp::Ordering;
use std::fmt;

use crate::candidate::ProjectCandidate;

/// Sort mode, cycled Size↓ → Size↑ → Path↑ → Path↓.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    SizeDesc,
    SizeAsc,
    PathAsc,
    PathDesc,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::SizeDesc => SortMode::SizeAsc,
            SortMode::SizeAsc => SortMode::PathAsc,
            SortMode::PathAsc => SortMode::PathDesc,
            SortMode::PathDesc => SortMode::SizeDesc,
        }
    }

    /// Parse the config spelling (`size-desc`, `path-asc`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "size-desc" => Some(SortMode::SizeDesc),
            "size-asc" => Some(SortMode::SizeAsc),
            "path-asc" => Some(SortMode::PathAsc),
            "path-desc" => Some(SortMode::PathDesc),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::SizeDesc => "size ↓",
            SortMode::SizeAsc => "size ↑",
            SortMode::PathAsc => "path ↑",
            SortMode::PathDesc => "path ↓",
        }
    }

    /// Total order over candidates. Paths are unique, so no two distinct
    /// candidates compare equal.
    pub fn compare(self, a: &ProjectCandidate, b: &ProjectCandidate) -> Ordering {
        let by_path = || a.path.as_os_str().cmp(b.path.as_os_str());
        match self {
            SortMode::SizeDesc => by_size(a.size, b.size, true).then_with(by_path),
            SortMode::SizeAsc => by_size(a.size, b.size, false).then_with(by_path),
            SortMode::PathAsc => by_path(),
            SortMode::PathDesc => by_path().reverse(),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Unsized candidates go after every sized one in both directions.
fn by_size(a: Option<u64>, b: Option<u64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Which strategy family is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Strategy(String),
}

impl Filter {
    /// All → each name in order → All.
    pub fn next(&self, names: &[String]) -> Filter {
        let next = match self {
            Filter::All => names.first(),
            Filter::Strategy(name) => names
                .iter()
                .position(|n| n == name)
                .and_then(|i| names.get(i + 1)),
        };
        next.map(|name| Filter::Strategy(name.clone()))
            .unwrap_or(Filter::All)
    }

    pub fn matches(&self, candidate: &ProjectCandidate) -> bool {
        match self {
            Filter::All => true,
            Filter::Strategy(name) => &candidate.strategy == name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Filter::All => "All",
            Filter::Strategy(name) => name,
        }
    }
}
