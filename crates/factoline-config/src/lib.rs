//! Configuration for the factoline storefront.
//!
//! Layered loading (built-in defaults, then `config.toml`, then
//! `FACTOLINE_*` environment variables) and translation of the configured
//! initial filters into a `factoline_core::Selection`. CLI flags are applied
//! on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use factoline_core::Selection;

/// Environment prefix; nested keys are separated by `__`
/// (`FACTOLINE_UI__GRID_COLUMNS=2`).
pub const ENV_PREFIX: &str = "FACTOLINE_";

/// Upper bound for `ui.grid_columns`.
pub const MAX_GRID_COLUMNS: u16 = 4;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Catalog file (`.json` or `.toml`). The built-in catalog is used
    /// when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Filter options checked at startup, keyed by category id.
    #[serde(default)]
    pub initial_selection: IndexMap<String, Vec<String>>,

    /// Search text at startup.
    #[serde(default)]
    pub initial_query: String,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        let mut initial_selection = IndexMap::new();
        initial_selection.insert("essence".into(), vec!["oak".into()]);
        Self {
            catalog: None,
            initial_selection,
            initial_query: String::new(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default = "default_render_rate_ms")]
    pub render_rate_ms: u64,

    /// Product cards per row on a wide terminal.
    #[serde(default = "default_grid_columns")]
    pub grid_columns: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            render_rate_ms: default_render_rate_ms(),
            grid_columns: default_grid_columns(),
        }
    }
}

fn default_tick_rate_ms() -> u64 {
    250
}
fn default_render_rate_ms() -> u64 {
    33
}
fn default_grid_columns() -> u16 {
    3
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn render_rate(&self) -> Duration {
        Duration::from_millis(self.render_rate_ms)
    }
}

impl Config {
    /// The configured startup filters as a domain selection.
    /// Empty option lists leave their category unchecked.
    pub fn initial_selection(&self) -> Selection {
        self.initial_selection
            .iter()
            .map(|(category, options)| (category.as_str(), options.iter().map(String::as_str)))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ui.tick_rate_ms == 0 {
            return Err(ConfigError::Validation {
                field: "ui.tick_rate_ms".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.ui.render_rate_ms == 0 {
            return Err(ConfigError::Validation {
                field: "ui.render_rate_ms".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if !(1..=MAX_GRID_COLUMNS).contains(&self.ui.grid_columns) {
            return Err(ConfigError::Validation {
                field: "ui.grid_columns".into(),
                reason: format!(
                    "expected 1 to {MAX_GRID_COLUMNS}, got {}",
                    self.ui.grid_columns
                ),
            });
        }
        if let Some((category, _)) = self.initial_selection.iter().find(|(k, _)| k.is_empty()) {
            return Err(ConfigError::Validation {
                field: "initial_selection".into(),
                reason: format!("empty category id {category:?}"),
            });
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "factoline", "factoline").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("factoline");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the config from `path` + environment. A missing file yields the
/// defaults; a malformed one is an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config = figment_for(path).extract::<Config>()?;
    config.validate()?;
    debug!(path = %path.display(), exists = path.exists(), "config loaded");
    Ok(config)
}

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}
