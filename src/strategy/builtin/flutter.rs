//! Flutter/Dart project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Flutter and plain Dart projects, marked by `pubspec.yaml`.
pub struct FlutterStrategy;

impl CleaningStrategy for FlutterStrategy {
    fn id(&self) -> &'static str {
        "flutter"
    }

    fn name(&self) -> &'static str {
        "Flutter"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &["pubspec.yaml"]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["build", ".dart_tool"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~1-3 mins (flutter pub get + build)"
    }
}
