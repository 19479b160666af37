use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::console::SortMode;
use crate::error::ConfigError;
use crate::scan::{ScanOptions, DEFAULT_CHANNEL_CAPACITY, DEFAULT_EXCLUDES};
use crate::strategy::StrategyRegistry;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub strategies: StrategiesConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of worker threads (0 = auto)
    pub threads: usize,
    /// Maximum descent depth (unset = unlimited)
    pub max_depth: Option<usize>,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    /// Progress channel capacity
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategiesConfig {
    /// Strategy ids to use (empty = all built-ins)
    pub enabled: Vec<String>,
    /// Strategy ids to leave out
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Initial sort: size-desc, size-asc, path-asc, path-desc
    pub default_sort: String,
    /// Rows per page before the terminal size is known
    pub page_size: usize,
    /// Input poll / redraw interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_depth: None,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_sort: "size-desc".to_string(),
            page_size: 20,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the per-user file
    /// (`~/.config/spektr/config.toml` on Linux) is used when present,
    /// otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Per-user config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("spektr").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.page_size == 0 {
            return Err(ConfigError::Invalid(
                "console.page_size must be at least 1".into(),
            ));
        }
        if self.scan.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "scan.channel_capacity must be at least 1".into(),
            ));
        }
        if SortMode::parse(&self.console.default_sort).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown console.default_sort '{}'",
                self.console.default_sort
            )));
        }
        Ok(())
    }

    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new()
            .with_threads(self.scan.threads)
            .with_exclude(self.scan.exclude.clone())
            .with_channel_capacity(self.scan.channel_capacity);
        if let Some(depth) = self.scan.max_depth {
            options = options.with_max_depth(depth);
        }
        options
    }

    /// Build the strategy registry from `enabled` / `disabled`.
    pub fn registry(&self) -> StrategyRegistry {
        let enabled: Vec<&str> = self.strategies.enabled.iter().map(|s| s.as_str()).collect();
        let disabled: Vec<&str> = self.strategies.disabled.iter().map(|s| s.as_str()).collect();

        let base = if enabled.is_empty() {
            StrategyRegistry::without_types(&disabled)
        } else {
            StrategyRegistry::with_types(&enabled)
        };

        if enabled.is_empty() || disabled.is_empty() {
            return base;
        }

        let keep: Vec<&str> = base
            .ids()
            .into_iter()
            .filter(|id| !disabled.contains(id))
            .collect();
        StrategyRegistry::with_types(&keep)
    }

    pub fn sort_mode(&self) -> SortMode {
        SortMode::parse(&self.console.default_sort).unwrap_or_default()
    }
}
