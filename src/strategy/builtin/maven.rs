//! Maven project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Maven projects.
///
/// Identifies projects by the presence of `pom.xml` and reclaims
/// the `target/` directory.
pub struct MavenStrategy;

impl CleaningStrategy for MavenStrategy {
    fn id(&self) -> &'static str {
        "maven"
    }

    fn name(&self) -> &'static str {
        "Maven"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &["pom.xml"]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["target"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~2-5 mins (mvn package)"
    }
}
