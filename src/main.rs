use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use spektr::cli::{Cli, Mode};
use spektr::commands;
use spektr::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    let registry = Arc::new(commands::registry(&cli, &config)?);
    let options = commands::scan_options(&cli, &config);

    match cli.mode {
        Mode::Headless => {
            tracing::info!(path = %cli.path.display(), "Starting headless scan");
            commands::headless::run(&cli.path, registry, options, cli.json, cli.quiet)?;
        }
        Mode::Interactive => {
            tracing::info!(path = %cli.path.display(), "Starting console");
            commands::interactive::run(&cli.path, registry, options, &config, cli.dry_run)?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spektr={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
