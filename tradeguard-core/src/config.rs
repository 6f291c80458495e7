//! Settings: analyzer endpoint, display precision and log level.
//!
//! Stored as a TOML file, by default under the platform config directory
//! (`~/.config/tradeguard/config.toml` on Linux). Every section is optional;
//! missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Highest number of decimals the display accepts.
pub const MAX_PRECISION: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Image analyzer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    /// Base URL of the generative language API.
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Environment variable consulted when no key is given explicitly.
    pub api_key_env: String,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 60,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl AnalyzerSettings {
    /// API key from the configured environment variable, if set and non-blank.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimals shown for prices.
    pub precision: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `tradeguard_core=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// The complete settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub analyzer: AnalyzerSettings,
    pub display: DisplaySettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Default settings file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tradeguard").join("config.toml"))
    }

    /// Load and validate settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write settings to disk, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(write_err)?;
        tracing::info!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("analyzer.endpoint is empty".into()));
        }
        if self.analyzer.model.trim().is_empty() {
            return Err(ConfigError::Invalid("analyzer.model is empty".into()));
        }
        if self.analyzer.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "analyzer.timeout_secs must be positive".into(),
            ));
        }
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "display.precision must be at most {MAX_PRECISION}, got {}",
                self.display.precision
            )));
        }
        Ok(())
    }
}
