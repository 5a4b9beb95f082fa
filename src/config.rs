//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{HttpHealthApiConfig, DEFAULT_API_BASE};
use crate::view::ViewSettings;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset leaves the HTTP client's own default in place
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> HttpHealthApiConfig {
        HttpHealthApiConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_dashboard_days")]
    pub dashboard_days: u32,

    #[serde(default = "default_watch_record_limit")]
    pub watch_record_limit: u32,

    #[serde(default = "default_food_trend_days")]
    pub food_trend_days: u32,

    #[serde(default = "default_notice_duration")]
    pub notice_duration_ms: u64,
}

fn default_dashboard_days() -> u32 {
    7
}

fn default_watch_record_limit() -> u32 {
    20
}

fn default_food_trend_days() -> u32 {
    7
}

fn default_notice_duration() -> u64 {
    3000 // 3 seconds
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            dashboard_days: default_dashboard_days(),
            watch_record_limit: default_watch_record_limit(),
            food_trend_days: default_food_trend_days(),
            notice_duration_ms: default_notice_duration(),
        }
    }
}

impl ViewConfig {
    pub fn settings(&self) -> ViewSettings {
        ViewSettings {
            dashboard_days: self.dashboard_days,
            watch_record_limit: self.watch_record_limit,
            food_trend_days: self.food_trend_days,
            notice_duration: Duration::from_millis(self.notice_duration_ms),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("clawhealth").join("config.toml")),
            Some(PathBuf::from("./clawhealth.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("CLAWHEALTH_API_URL") {
            self.api.base_url = url;
        }
        if let Some(level) = var("CLAWHEALTH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CLAWHEALTH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# ClawHealth Configuration
#
# Environment variables override these settings:
# - CLAWHEALTH_API_URL
# - CLAWHEALTH_LOG_LEVEL
# - CLAWHEALTH_LOG_FORMAT

[api]
# Base URL of the ClawHealth backend
base_url = "http://localhost:5000"

# Request timeout in seconds (unset: no explicit timeout)
# request_timeout_secs = 30

[view]
# Days covered by the dashboard when no range is chosen
dashboard_days = 7

# Rows shown in the watch records table
watch_record_limit = 20

# Days covered by the calorie intake chart
food_trend_days = 7

# How long notices stay visible (ms)
notice_duration_ms = 3000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
