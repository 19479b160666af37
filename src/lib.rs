//! spektr - find and reclaim build artifacts across many projects
//!
//! This crate provides:
//! - Pluggable project classification (`strategy`)
//! - A concurrent, cancellable discovery engine (`scan`)
//! - A terminal-independent review state machine (`console`)
//! - Guarded removal of confirmed targets (`delete`)
//! - A ratatui front end for the console (`tui`)

pub mod candidate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod delete;
pub mod error;
pub mod scan;
pub mod strategy;
pub mod tui;

// Re-export commonly used types
pub use candidate::{DeletionStatus, DeletionTarget, ProjectCandidate};
pub use config::Config;
pub use error::{Result, SpektrError};
