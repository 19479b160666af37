//! Python project strategy.

use crate::strategy::{CleaningStrategy, RiskLevel};

/// Strategy for Python projects.
///
/// Identifies projects by a packaging manifest or an in-tree virtualenv.
/// Virtualenvs can carry packages installed by hand, hence the medium risk.
pub struct PythonStrategy;

impl CleaningStrategy for PythonStrategy {
    fn id(&self) -> &'static str {
        "python"
    }

    fn name(&self) -> &'static str {
        "Python"
    }

    fn marker_files(&self) -> &'static [&'static str] {
        &[
            "pyproject.toml",
            "requirements.txt",
            "setup.py",
            "venv",
            ".venv",
        ]
    }

    fn target_dirs(&self) -> &'static [&'static str] {
        &[
            ".venv",
            "venv",
            "__pycache__",
            ".pytest_cache",
            ".mypy_cache",
            ".tox",
        ]
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Medium
    }

    fn rebuild_estimate(&self) -> &'static str {
        "~1-5 mins (pip install)"
    }
}
