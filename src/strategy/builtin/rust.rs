//! Cargo/Rust project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Rust/Cargo projects.
///
/// Identifies projects by the presence of `Cargo.toml` and reclaims
/// the `target/` directory.
pub struct RustStrategy;

impl CleaningStrategy for RustStrategy {
    fn id(&self) -> &'static str {
        "rust"
    }

    fn name(&self) -> &'static str {
        "Rust"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &["Cargo.toml"]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["target"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~2-5 mins (cargo build)"
    }
}
