//! Configuration loading for the Jsondeck server.
//!
//! The configuration lives in a YAML file (default `jsondeck.yaml`,
//! overridable via `JSONDECK_CONFIG`). Every field has a default, so a
//! missing file or a partial file is valid. Environment variables are
//! applied on top of the parsed file:
//!
//! - `JSONDECK_HOST` overrides `server.host`
//! - `JSONDECK_PORT` overrides `server.port`
//! - `JSONDECK_DATA_DIR` overrides `storage.data_dir`
//! - `JSONDECK_LOG` overrides `logging.level`

use std::path::{Path, PathBuf};

use jsondeck_api::ServerConfig;
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "JSONDECK_CONFIG";

/// Configuration file used when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "jsondeck.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// An override held an unusable value.
    #[error("invalid {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the collection documents live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding `users.json` and `posts.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    String::from("info")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file found; defaults were used.
    Defaults(PathBuf),
}

impl AppConfig {
    /// Load configuration from the file named by `JSONDECK_CONFIG` (or
    /// `jsondeck.yaml`) and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or an override is invalid.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// [`AppConfig::load`] with an explicit variable lookup.
    pub fn load_with<F>(lookup: F) -> Result<(Self, ConfigSource), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = lookup(CONFIG_PATH_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

        let (mut config, source) = if path.exists() {
            (Self::from_file(&path)?, ConfigSource::File(path))
        } else {
            (Self::default(), ConfigSource::Defaults(path))
        };

        config.apply_overrides(lookup)?;
        Ok((config, source))
    }

    /// Parse configuration from a YAML file, without overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, without overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `JSONDECK_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("JSONDECK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("JSONDECK_PORT") {
            self.server.port = port.parse().map_err(|e| ConfigError::Invalid {
                name: "JSONDECK_PORT",
                reason: format!("{e}"),
            })?;
        }
        if let Some(dir) = lookup("JSONDECK_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("JSONDECK_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }
}
