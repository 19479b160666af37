//! Command glue between the CLI, the config file and the library.

pub mod headless;
pub mod interactive;

use anyhow::{bail, Result};

use crate::cli::Cli;
use crate::config::Config;
use crate::scan::ScanOptions;
use crate::strategy::StrategyRegistry;

/// Strategy registry from `--types`, falling back to the config file.
pub fn registry(cli: &Cli, config: &Config) -> Result<StrategyRegistry> {
    let registry = match &cli.types {
        Some(types) => {
            let ids: Vec<&str> = types.iter().map(|s| s.as_str()).collect();
            StrategyRegistry::with_types(&ids)
        }
        None => config.registry(),
    };

    if registry.is_empty() {
        bail!(
            "No valid project types selected. Valid types: {}",
            StrategyRegistry::builtin().ids().join(", ")
        );
    }
    Ok(registry)
}

/// Scan options from the config file with CLI flags on top.
pub fn scan_options(cli: &Cli, config: &Config) -> ScanOptions {
    let mut options = config.scan_options();

    if let Some(jobs) = cli.jobs {
        options = options.with_threads(jobs);
    }
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth);
    }
    if let Some(extra) = &cli.exclude {
        let mut exclude = options.exclude.clone();
        exclude.extend(extra.iter().cloned());
        options = options.with_exclude(exclude);
    }
    options
}
