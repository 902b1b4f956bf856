//! Configuration management for upview
//!
//! This module handles loading, validation, and management of
//! upview configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigResult};

/// Environment variable that overrides `up.token`
pub const TOKEN_ENV_VAR: &str = "UP_TOKEN";

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8082
}

/// Up API access
#[derive(Clone, Serialize, Deserialize)]
pub struct UpConfig {
    /// Personal access token, sent as a bearer credential
    #[serde(default, skip_serializing)]
    pub token: String,
    /// Base URL of the Up API
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for UpConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
        }
    }
}

impl std::fmt::Debug for UpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpConfig")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn default_api_base() -> String {
    "https://api.up.com.au/api/v1".to_string()
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Locale for amount formatting; empty follows the environment
    #[serde(default)]
    pub locale: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
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

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Up API settings
    #[serde(default)]
    pub up: UpConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply the environment token and validate
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        let config = Self::from_yaml_str(&content)?
            .with_token_override(std::env::var(TOKEN_ENV_VAR).ok());

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    /// The environment token is applied in both cases.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            return Self::load(path.to_path_buf());
        }

        let config = Self::default().with_token_override(std::env::var(TOKEN_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration without validating it
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(content).map_err(|_| ConfigError::InvalidYaml)
    }

    /// Replace the token when a non-empty override is given
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.up.token = token;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.up.token.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "up.token".to_string(),
            });
        }

        if !(self.up.api_base.starts_with("https://") || self.up.api_base.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "up.api_base".to_string(),
                reason: "API base must be an http(s) URL".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Full URL of the account list endpoint
    pub fn accounts_url(&self) -> String {
        format!("{}/accounts", self.up.api_base.trim_end_matches('/'))
    }

    /// Configured locale, if any
    pub fn locale(&self) -> Option<&str> {
        let locale = self.display.locale.trim();
        if locale.is_empty() {
            None
        } else {
            Some(locale)
        }
    }
}
