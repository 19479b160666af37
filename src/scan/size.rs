use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::token::CancellationToken;

/// Sum the apparent size of regular files under `path`.
///
/// Symlinks are not followed. Unreadable entries and a missing `path`
/// count as zero. Returns `None` if `token` is cancelled mid-walk.
pub fn dir_size(path: &Path, token: &CancellationToken) -> Option<u64> {
    let mut total = 0u64;

    for entry in WalkDir::new(path).follow_links(false) {
        if token.is_cancelled() {
            return None;
        }

        let Ok(entry) = entry else {
            continue;
        };

        if entry.file_type().is_file() {
            if let Ok(metadata) = entry.metadata() {
                total += metadata.len();
            }
        }
    }

    Some(total)
}

/// Total reclaimable bytes for a candidate's targets.
pub fn targets_size(targets: &[PathBuf], token: &CancellationToken) -> Option<u64> {
    targets.iter().try_fold(0u64, |acc, target| {
        dir_size(target, token).map(|size| acc + size)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_size_sums_nested_files() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::write(tmp.path().join("a/one.bin"), "x".repeat(100)).unwrap();
        fs::write(tmp.path().join("a/b/two.bin"), "x".repeat(250)).unwrap();

        let token = CancellationToken::new();
        assert_eq!(dir_size(tmp.path(), &token), Some(350));
    }

    #[test]
    fn test_dir_size_missing_path_is_zero() {
        let tmp = TempDir::new().unwrap();
        let token = CancellationToken::new();

        assert_eq!(dir_size(&tmp.path().join("gone"), &token), Some(0));
    }

    #[test]
    fn test_dir_size_cancelled() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f"), "x").unwrap();

        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(dir_size(tmp.path(), &token), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_dir_size_ignores_symlinked_content() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("big.bin"), "x".repeat(10_000)).unwrap();
        fs::create_dir(tmp.path().join("target")).unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("target/link")).unwrap();

        let token = CancellationToken::new();
        assert_eq!(dir_size(&tmp.path().join("target"), &token), Some(0));
    }

    #[test]
    fn test_targets_size() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("target")).unwrap();
        fs::create_dir(tmp.path().join("build")).unwrap();
        fs::write(tmp.path().join("target/a"), "x".repeat(500)).unwrap();
        fs::write(tmp.path().join("build/b"), "x".repeat(300)).unwrap();

        let targets = vec![
            tmp.path().join("target"),
            tmp.path().join("build"),
            tmp.path().join("vanished"),
        ];
        let token = CancellationToken::new();

        assert_eq!(targets_size(&targets, &token), Some(800));
    }
}
