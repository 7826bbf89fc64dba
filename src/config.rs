use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::catalog::{CatalogSource, FileCatalog, SeedCatalog};
use crate::core::schedule::DEFAULT_COST_PER_MESSAGE;

const APP_DIR: &str = "autoblitz";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub catalog: CatalogConfig,
    pub schedule: ScheduleConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data and log directory overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: Option<PathBuf>,
    /// Defaults to `<data_dir>/logs`.
    pub log_dir: Option<PathBuf>,
}

/// Where templates, segments and seed contacts come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML catalog file. Built-in seed data when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Price per message for the summary's cost estimate.
    pub cost_per_message: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cost_per_message: DEFAULT_COST_PER_MESSAGE,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/autoblitz/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data
            .log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("logs"))
    }

    /// Catalog source named by the configuration.
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog.path {
            Some(path) => Box::new(FileCatalog::new(path)),
            None => Box::new(SeedCatalog),
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
