//! cadence-player specific configuration
//!
//! Combines the shared TOML file with command-line overrides and turns the
//! configured playlist into a [`Player`].

use cadence_common::config::{resolve_config_path, TomlConfig, CONFIG_ENV_VAR};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::playback::Player;

/// Runner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File the settings came from, if any
    pub config_path: Option<PathBuf>,
    /// Tracing filter directive
    pub log_level: String,
    /// Interval between progress log lines
    pub status_interval: Duration,
}

impl Config {
    /// Resolve settings: command line first, then the TOML file, then defaults
    ///
    /// Returns the parsed file alongside so the caller can build the playlist.
    pub fn resolve(
        cli_config: Option<&Path>,
        cli_log_level: Option<&str>,
    ) -> Result<(Self, TomlConfig)> {
        let config_path = resolve_config_path(cli_config, CONFIG_ENV_VAR);
        let toml_config = TomlConfig::load_or_default(config_path.as_deref())?;

        let config = Self {
            log_level: cli_log_level
                .map(str::to_string)
                .unwrap_or_else(|| toml_config.logging.level.clone()),
            status_interval: Duration::from_millis(toml_config.playback.status_interval_ms),
            config_path,
        };

        Ok((config, toml_config))
    }
}

impl Player {
    /// Build a player from the `[[playlist]]` entries of a config file
    ///
    /// Entries are validated in order; the first invalid one is reported
    /// by index.
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        Self::try_new(
            config
                .playlist
                .iter()
                .map(|entry| (entry.name.clone(), Duration::from_millis(entry.duration_ms))),
        )
    }
}
