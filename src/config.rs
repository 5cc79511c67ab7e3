use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::catalog::CatalogSource;
use crate::core::search::matcher::DEFAULT_THRESHOLD;
use crate::core::view_model::DEFAULT_PAGE_SIZE;

/// Prefix for environment overrides, e.g. `MXGUIDE_SEARCH__PAGE_SIZE=20`.
pub const ENV_PREFIX: &str = "MXGUIDE_";

const APP_DIR: &str = "mx-error-guide";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Data locations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs, progress).
    pub data_dir: Option<PathBuf>,
    /// Catalog JSON file. `None` uses the catalog built into the binary.
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results per page in the search view.
    pub page_size: usize,
    /// Fuzzy match threshold in `[0, 1]`; higher is looser.
    pub fuzzy_threshold: f64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fuzzy_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load from `~/.config/mx-error-guide/config.toml` plus environment.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path` plus environment.
    /// Returns `Default` if the file is unparseable.
    pub fn load_from(path: &Path) -> Self {
        match Self::figment(path).extract::<AppConfig>() {
            Ok(config) => {
                if path.exists() {
                    log::info!("Loaded config from {}", path.display());
                } else {
                    log::debug!("No config file at {}, using defaults", path.display());
                }
                config.normalized()
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse config at {}: {e}, using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Defaults, then the TOML file, then `MXGUIDE_*` variables.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn normalized(mut self) -> Self {
        self.search.page_size = self.search.page_size.max(1);
        self.search.fuzzy_threshold = self.search.fuzzy_threshold.clamp(0.0, 1.0);
        self.tui.tick_rate_ms = self.tui.tick_rate_ms.max(1);
        self
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::from_path(self.data.catalog_path.clone())
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
