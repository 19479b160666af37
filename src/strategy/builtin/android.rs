//! Gradle/Android project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Gradle and Android projects.
///
/// Identifies projects by a Gradle build or settings script and reclaims
/// the module build output and the project-local Gradle cache.
pub struct AndroidStrategy;

impl CleaningStrategy for AndroidStrategy {
    fn id(&self) -> &'static str {
        "android"
    }

    fn name(&self) -> &'static str {
        "Android/Gradle"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &[
            "build.gradle",
            "build.gradle.kts",
            "settings.gradle",
            "settings.gradle.kts",
        ]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["app/build", "build", ".gradle"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~3-10 mins (gradle build)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_android_detection_groovy() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("build.gradle"), "apply plugin: 'android'").unwrap();

        assert!(AndroidStrategy.detect(tmp.path()));
    }

    #[test]
    fn test_android_detection_kotlin_settings() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("settings.gradle.kts"), "").unwrap();

        assert!(AndroidStrategy.detect(tmp.path()));
    }

    #[test]
    fn test_android_nested_module_target() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("app/build/outputs")).unwrap();
        fs::create_dir(tmp.path().join(".gradle")).unwrap();

        let targets = AndroidStrategy.targets(tmp.path());

        assert_eq!(targets.len(), 2);
        assert!(targets[0].ends_with("app/build"));
        assert!(targets[1].ends_with(".gradle"));
    }
}
