//! Interactive review console.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use humansize::{format_size, BINARY};

use crate::config::Config;
use crate::delete::{DeleteOptions, DeletionExecutor};
use crate::scan::ScanOptions;
use crate::strategy::StrategyRegistry;
use crate::tui::{self, App};

/// Open the console on `root` and block until the user quits.
pub fn run(
    root: &Path,
    registry: Arc<StrategyRegistry>,
    options: ScanOptions,
    config: &Config,
    dry_run: bool,
) -> Result<()> {
    let executor = DeletionExecutor::new(DeleteOptions { dry_run });
    let app = App::new(
        root,
        registry,
        options,
        executor,
        config.sort_mode(),
        config.console.page_size,
    )?;

    let reclaimed = tui::run(app, Duration::from_millis(config.console.tick_rate_ms))?;

    if reclaimed > 0 {
        let verb = if dry_run { "Would reclaim" } else { "Reclaimed" };
        println!("{} {}", verb, format_size(reclaimed, BINARY));
    }
    Ok(())
}
