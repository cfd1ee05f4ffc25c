use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Board output after each successful move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    /// Dump the whole padded backing store instead of the playable grid.
    pub show_padding: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Keep reading after a rejected column instead of ending the game.
    pub retry_on_input_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl LogConfig {
    /// Filter directive to install. An explicit `--log-level` beats
    /// `RUST_LOG`, which beats the configured level.
    pub fn directive(&self, cli_level: Option<&str>, env_filter: Option<&str>) -> String {
        match (cli_level, env_filter) {
            (Some(level), _) => level.to_ascii_lowercase(),
            (None, Some(env)) => env.to_string(),
            (None, None) => self.level.to_ascii_lowercase(),
        }
    }
}

/// Check a level name against the accepted set.
pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "log.level must be one of {}, got '{}'",
            LOG_LEVELS.join(", "),
            level
        )))
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub play: PlayConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_log_level(&self.log.level)?;
        if self.render.show_padding && !self.render.enabled {
            return Err(ConfigError::Validation(
                "render.show_padding requires render.enabled".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
