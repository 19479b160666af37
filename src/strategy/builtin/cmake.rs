//! CMake project strategy.

use std::path::Path;

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for CMake projects.
///
/// Only matches when `CMakeLists.txt` sits next to an actual build tree, so
/// sources vendored into other projects are not claimed. Build trees may
/// carry hand-edited cache entries, hence the medium risk.
pub struct CMakeStrategy;

impl CleaningStrategy for CMakeStrategy {
    fn id(&self) -> &'static str {
        "cmake"
    }

    fn name(&self) -> &'static str {
        "CMake"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &["CMakeLists.txt"]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["build", "cmake-build-debug", "cmake-build-release"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Medium
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~5-30 mins (cmake + make)"
    }

    fn detect(&self, path: &Path) -> bool {
        path.join("CMakeLists.txt").exists()
            && self.target_dirs().iter().any(|d| path.join(d).is_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cmake_detection_with_build() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "cmake_minimum_required(VERSION 3.10)").unwrap();
        fs::create_dir(tmp.path().join("build")).unwrap();

        assert!(CMakeStrategy.detect(tmp.path()));
    }

    #[test]
    fn test_cmake_detection_with_ide_build_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("cmake-build-debug")).unwrap();

        assert!(CMakeStrategy.detect(tmp.path()));
    }

    #[test]
    fn test_cmake_no_detection_without_build() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "cmake_minimum_required(VERSION 3.10)").unwrap();

        assert!(!CMakeStrategy.detect(tmp.path()));
    }

    #[test]
    fn test_cmake_no_detection_without_cmakelists() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("build")).unwrap();

        assert!(!CMakeStrategy.detect(tmp.path()));
    }
}
