/// Configuration options for a project scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Number of worker threads (0 = available parallelism)
    pub threads: usize,

    /// Maximum depth to descend below the root (None = unlimited)
    pub max_depth: Option<usize>,

    /// Directory names never descended into
    pub exclude: Vec<String>,

    /// Capacity of the progress channel; producers block when it is full
    pub channel_capacity: usize,
}

/// Directory names skipped unless the caller says otherwise.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "node_modules"];

pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            max_depth: None,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of worker threads
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set maximum descent depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Replace the excluded directory names
    pub fn with_exclude(mut self, names: Vec<String>) -> Self {
        self.exclude = names;
        self
    }

    /// Set progress channel capacity (at least 1)
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Check whether a directory name is excluded from descent.
    pub fn is_excluded(&self, name: &std::ffi::OsStr) -> bool {
        match name.to_str() {
            Some(name) => self.exclude.iter().any(|e| e == name),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_default_options() {
        let opts = ScanOptions::default();
        assert_eq!(opts.threads, 0);
        assert_eq!(opts.max_depth, None);
        assert_eq!(opts.exclude, vec![".git", "node_modules"]);
        assert_eq!(opts.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_scan_options_chaining() {
        let opts = ScanOptions::new()
            .with_threads(8)
            .with_max_depth(4)
            .with_exclude(vec!["vendor".to_string()])
            .with_channel_capacity(16);

        assert_eq!(opts.threads, 8);
        assert_eq!(opts.max_depth, Some(4));
        assert_eq!(opts.exclude, vec!["vendor"]);
        assert_eq!(opts.channel_capacity, 16);
    }

    #[test]
    fn test_channel_capacity_never_zero() {
        let opts = ScanOptions::new().with_channel_capacity(0);
        assert_eq!(opts.channel_capacity, 1);
    }

    #[test]
    fn test_is_excluded() {
        let opts = ScanOptions::default();
        assert!(opts.is_excluded(OsStr::new(".git")));
        assert!(opts.is_excluded(OsStr::new("node_modules")));
        assert!(!opts.is_excluded(OsStr::new("src")));
        assert!(!opts.is_excluded(OsStr::new(".github")));
    }
}
