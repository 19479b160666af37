//! npm/Node.js project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Node.js projects.
///
/// Identifies projects by the presence of `package.json` and reclaims
/// installed dependencies plus common bundler output.
pub struct NodeStrategy;

impl CleaningStrategy for NodeStrategy {
    fn id(&self) -> &'static str {
        "node"
    }

    fn name(&self) -> &'static str {
        "Node.js"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &["package.json"]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["node_modules", ".next", ".nuxt", "dist", ".turbo"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~1-2 mins (npm install)"
    }
}
