//! .NET project strategy.

use std::path::Path;

use crate::strategy::{has_file_with_extension, CleaningStrategy, RiskLevel};

/// Strategy for .NET projects.
///
/// Identifies projects by the presence of `*.csproj`, `*.fsproj` or `*.sln`
/// files and reclaims `bin/` and `obj/`.
pub struct DotnetStrategy;

impl CleaningStrategy for DotnetStrategy {
    fn id(&self) -> &'static str {
        "dotnet"
    }

    fn name(&self) -> &'static str {
        ".NET"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &[] // Uses custom detection
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &["bin", "obj"]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Low
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~1-3 mins (dotnet build)"
    }

    fn detect(&self, path: &Path) -> bool {
        has_file_with_extension(path, &["csproj", "fsproj", "sln"])
    }
}
