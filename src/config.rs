//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::render::PageOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the snapshot document is read from
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// HTTP(S) URL of the snapshot; takes precedence over `path`
    pub url: Option<String>,

    /// Local snapshot file, used when no URL is set
    #[serde(default = "default_source_path")]
    pub path: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_source_path() -> Option<String> {
    Some("./static/data.json".to_string())
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: default_source_path(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Refresh loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_interval() -> u64 {
    60
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "./static".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page shell appearance
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Value of `--win-color`
    #[serde(default = "default_win_color")]
    pub win_color: String,

    /// Value of `--loss-color`
    #[serde(default = "default_loss_color")]
    pub loss_color: String,
}

fn default_title() -> String {
    "Rankboard".to_string()
}

fn default_win_color() -> String {
    "#4ade80".to_string()
}

fn default_loss_color() -> String {
    "#f87171".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            win_color: default_win_color(),
            loss_color: default_loss_color(),
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

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
            dirs::config_dir().map(|p| p.join("rankboard").join("config.toml")),
            Some(PathBuf::from("/etc/rankboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Source overrides
        if let Some(url) = var("RANKBOARD_SOURCE_URL") {
            self.source.url = Some(url);
        }
        if let Some(path) = var("RANKBOARD_SOURCE_PATH") {
            self.source.path = Some(path);
        }

        // Refresh overrides
        if let Some(secs) = var("RANKBOARD_REFRESH_SECS").and_then(|s| s.parse().ok()) {
            self.refresh.interval_secs = secs;
        }

        // API overrides
        if let Some(host) = var("RANKBOARD_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("RANKBOARD_PORT").and_then(|s| s.parse().ok()) {
            self.api.port = port;
        }
        if let Some(dir) = var("RANKBOARD_STATIC_DIR") {
            self.api.static_dir = dir;
        }

        // Logging overrides
        if let Some(level) = var("RANKBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("RANKBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Page shell options derived from theme and refresh settings
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            title: self.theme.title.clone(),
            refresh_secs: self.refresh.interval_secs,
            win_color: self.theme.win_color.clone(),
            loss_color: self.theme.loss_color.clone(),
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
    r##"# Rankboard Configuration
#
# Environment variables override these settings:
# - RANKBOARD_SOURCE_URL
# - RANKBOARD_SOURCE_PATH
# - RANKBOARD_REFRESH_SECS
# - RANKBOARD_HOST
# - RANKBOARD_PORT
# - RANKBOARD_STATIC_DIR
# - RANKBOARD_LOG_LEVEL
# - RANKBOARD_LOG_FORMAT

[source]
# Snapshot URL. A `t=<ms>` query parameter is appended to every fetch.
# url = "http://127.0.0.1:5000/static/data.json"

# Snapshot file, used when no url is set
path = "./static/data.json"

# HTTP timeout for one fetch (ms)
request_timeout_ms = 10000

[refresh]
# Seconds between refreshes
interval_secs = 60

[api]
# Server host
host = "0.0.0.0"

# Server port
port = 5000

# Directory served under /static
static_dir = "./static"

# Allowed CORS origins (empty = permissive)
cors_origins = []

[theme]
title = "Rankboard"
win_color = "#4ade80"
loss_color = "#f87171"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
