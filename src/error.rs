use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum SpektrError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that prevent a scan from starting.
///
/// Problems found while walking (unreadable directories, vanished targets)
/// are reported as scan events instead and never abort the session.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Per-path deletion failures. None of these abort a deletion batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeletionError {
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("already removed: {0}")]
    AlreadyRemoved(PathBuf),

    #[error("refusing to delete mount point: {0}")]
    MountPoint(PathBuf),

    #[error("refusing to delete path outside its project: {0}")]
    OutsideCandidate(PathBuf),

    #[error("refusing to delete symlink: {0}")]
    Symlink(PathBuf),

    #[error("failed to delete '{path}': {message}")]
    Io { path: PathBuf, message: String },
}

impl DeletionError {
    /// Classify an IO error raised while removing `path`.
    pub fn from_io(path: PathBuf, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DeletionError::AlreadyRemoved(path),
            std::io::ErrorKind::PermissionDenied => DeletionError::PermissionDenied(path),
            _ => DeletionError::Io {
                path,
                message: err.to_string(),
            },
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SpektrError>;
