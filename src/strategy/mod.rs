//! Project classification.
//!
//! This module provides:
//! - The `CleaningStrategy` trait describing one project family
//! - Built-in strategies (Node.js, Rust, Flutter, Gradle, ...)
//! - An ordered, first-match-wins registry

pub mod builtin;
mod cleaning;
mod registry;

pub use builtin::all_strategies;
pub use cleaning::{CleaningStrategy, RiskLevel};
pub(crate) use cleaning::has_file_with_extension;
pub use registry::StrategyRegistry;
