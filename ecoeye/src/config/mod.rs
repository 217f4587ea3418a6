//! Configuration file handling.
//!
//! Settings load from an INI file, by default
//! `~/.config/ecoeye/config.ini`. Every key has a default so a missing
//! file yields a usable configuration; unknown keys are ignored.
//!
//! ```ini
//! [api]
//! url = https://api.eco-eye.example
//! timeout_secs = 30
//!
//! [fallback]
//! path = /etc/ecoeye/fallback.json
//!
//! [generator]
//! api_key = sk-...
//! model = gpt-4o
//! endpoint = https://api.openai.com/v1/chat/completions
//!
//! [limits]
//! hourly_requests = 10
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::backend::DEFAULT_HOURLY_LIMIT;

/// Default backend base URL.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be parsed.
    #[error("failed to parse config file: {0}")]
    Parse(String),

    /// A key has a value of the wrong type.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// The offending key.
        key: String,
        /// The raw value.
        value: String,
    },
}

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Backend base URL.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Fallback bundle settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackConfig {
    /// On-disk bundle overriding the embedded asset.
    pub path: Option<PathBuf>,
}

/// Generation upstream settings (local/offline mode).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// API key for the generation upstream.
    pub api_key: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Endpoint override.
    pub endpoint: Option<String>,
}

/// Rate limit settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Requests per client per rolling hour.
    pub hourly_requests: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            hourly_requests: DEFAULT_HOURLY_LIMIT,
        }
    }
}

/// The loaded configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    /// `[api]` section.
    pub api: ApiConfig,
    /// `[fallback]` section.
    pub fallback: FallbackConfig,
    /// `[generator]` section.
    pub generator: GeneratorConfig,
    /// `[limits]` section.
    pub limits: LimitsConfig,
}

impl ConfigFile {
    /// Default configuration file location.
    ///
    /// `~/.config/ecoeye/config.ini` on Linux (per the platform config
    /// directory convention), `None` when no config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ecoeye").join("config.ini"))
    }

    /// Load from the default location, or defaults when no file exists.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("api")) {
            if let Some(url) = section.get("url") {
                config.api.url = url.trim_end_matches('/').to_string();
            }
            if let Some(raw) = section.get("timeout_secs") {
                config.api.timeout_secs = parse_key("api.timeout_secs", raw)?;
            }
        }

        if let Some(section) = ini.section(Some("fallback")) {
            if let Some(path) = section.get("path") {
                config.fallback.path = Some(PathBuf::from(path));
            }
        }

        if let Some(section) = ini.section(Some("generator")) {
            config.generator.api_key = section.get("api_key").map(str::to_string);
            config.generator.model = section.get("model").map(str::to_string);
            config.generator.endpoint = section.get("endpoint").map(str::to_string);
        }

        if let Some(section) = ini.section(Some("limits")) {
            if let Some(raw) = section.get("hourly_requests") {
                config.limits.hourly_requests = parse_key("limits.hourly_requests", raw)?;
            }
        }

        Ok(config)
    }
}

fn parse_key<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.limits.hourly_requests, DEFAULT_HOURLY_LIMIT);
        assert!(config.fallback.path.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            "[api]\n\
             url = https://api.eco-eye.example/\n\
             timeout_secs = 10\n\
             \n\
             [fallback]\n\
             path = /tmp/fallback.json\n\
             \n\
             [generator]\n\
             api_key = sk-test\n\
             \n\
             [limits]\n\
             hourly_requests = 40\n",
        );

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.api.url, "https://api.eco-eye.example");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.fallback.path, Some(PathBuf::from("/tmp/fallback.json")));
        assert_eq!(config.generator.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.limits.hourly_requests, 40);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config("[api]\nurl = http://localhost:9999\n");
        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.api.url, "http://localhost:9999");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let file = write_config("[api]\ntimeout_secs = soon\n");
        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let file = write_config("[api]\nfrobnicate = yes\n[mystery]\nvalue = 1\n");
        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config, ConfigFile::default());
    }
}
