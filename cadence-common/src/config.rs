//! Configuration loading and config file resolution
//!
//! The TOML file describes logging, runner settings and the initial
//! playlist. A missing file is never fatal: callers fall back to defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CADENCE_CONFIG";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub playback: PlaybackSettings,

    /// Initial playlist, in playback order
    #[serde(default)]
    pub playlist: Vec<TrackEntry>,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. "info" or "cadence_player=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Interval between progress log lines
    #[serde(default = "default_status_interval_ms")]
    pub status_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            status_interval_ms: default_status_interval_ms(),
        }
    }
}

fn default_status_interval_ms() -> u64 {
    1000
}

/// One playlist entry as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    pub name: String,
    pub duration_ms: u64,
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        if config.playback.status_interval_ms == 0 {
            return Err(Error::Config(
                "playback.status_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(
            "Loaded config from {} ({} playlist entries)",
            path.display(),
            config.playlist.len()
        );
        Ok(config)
    }

    /// Load configuration, falling back to defaults when no file is given
    /// or the file does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                warn!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Write configuration to a TOML file
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Config file resolution priority:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. `<config dir>/cadence/config.toml`, if it exists
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|path| path.exists())
}

/// Platform config location (`~/.config/cadence/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cadence").join("config.toml"))
}
