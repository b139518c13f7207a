//! Configuration management
//!
//! This module handles loading and parsing configuration for Pencraft.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::normalize::NormalizeOptions;
use crate::search::{MatchFields, PreviewCaps, DEFAULT_SUGGESTION_CAP};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Content source configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Ranking and search parameters
    #[serde(default)]
    pub ranking: RankingConfig,
    /// Normalization defaults
    #[serde(default)]
    pub content: NormalizeOptions,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Where rows come from
    #[serde(default)]
    pub driver: SourceDriver,
    /// JSON snapshot file (snapshot driver)
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
    /// Backend base URL (rest driver), e.g. `https://xyz.example.co`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Anonymous API key sent to the backend (rest driver)
    #[serde(default)]
    pub api_key: Option<String>,
    /// HTTP timeout in seconds (rest driver)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reload interval in seconds, 0 disables periodic reloads
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            driver: SourceDriver::default(),
            snapshot_path: default_snapshot_path(),
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/snapshot.json")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_refresh_interval_secs() -> u64 {
    300
}

/// Content source driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceDriver {
    /// JSON snapshot file (default)
    #[default]
    Snapshot,
    /// Hosted backend REST interface
    Rest,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached results
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    3600
}

fn default_max_capacity() -> u64 {
    10_000
}

/// Ranking and search parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Maximum number of suggested articles
    #[serde(default = "default_suggestion_cap")]
    pub suggestion_cap: usize,
    /// Caps of the compact search preview
    #[serde(default)]
    pub preview: PreviewCaps,
    /// Maximum number of featured and of trending posts
    #[serde(default = "default_highlight_cap")]
    pub highlight_cap: usize,
    /// Fields matched by the search page
    #[serde(default = "MatchFields::full_search")]
    pub full_search: MatchFields,
    /// Fields matched by the blog-list quick filter
    #[serde(default = "MatchFields::quick_filter")]
    pub quick_filter: MatchFields,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            suggestion_cap: default_suggestion_cap(),
            preview: PreviewCaps::default(),
            highlight_cap: default_highlight_cap(),
            full_search: MatchFields::full_search(),
            quick_filter: MatchFields::quick_filter(),
        }
    }
}

fn default_suggestion_cap() -> usize {
    DEFAULT_SUGGESTION_CAP
}

fn default_highlight_cap() -> usize {
    6
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides,
    /// then validate it.
    ///
    /// Environment variables follow the pattern:
    /// - PENCRAFT_SERVER_HOST
    /// - PENCRAFT_SERVER_PORT
    /// - PENCRAFT_SERVER_CORS_ORIGIN
    /// - PENCRAFT_SOURCE_DRIVER
    /// - PENCRAFT_SOURCE_SNAPSHOT_PATH
    /// - PENCRAFT_SOURCE_BASE_URL
    /// - PENCRAFT_SOURCE_API_KEY
    /// - PENCRAFT_SOURCE_REFRESH_INTERVAL_SECS
    /// - PENCRAFT_CACHE_TTL_SECONDS
    /// - PENCRAFT_RANKING_SUGGESTION_CAP
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("PENCRAFT_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PENCRAFT_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("PENCRAFT_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Source configuration
        if let Ok(driver) = std::env::var("PENCRAFT_SOURCE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "snapshot" => self.source.driver = SourceDriver::Snapshot,
                "rest" => self.source.driver = SourceDriver::Rest,
                _ => {} // Ignore invalid values
            }
        }
        if let Ok(path) = std::env::var("PENCRAFT_SOURCE_SNAPSHOT_PATH") {
            self.source.snapshot_path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("PENCRAFT_SOURCE_BASE_URL") {
            self.source.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("PENCRAFT_SOURCE_API_KEY") {
            self.source.api_key = Some(key);
        }
        if let Ok(secs) = std::env::var("PENCRAFT_SOURCE_REFRESH_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.source.refresh_interval_secs = secs;
            }
        }

        // Cache configuration
        if let Ok(ttl) = std::env::var("PENCRAFT_CACHE_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.cache.ttl_seconds = ttl;
            }
        }

        // Ranking configuration
        if let Ok(cap) = std::env::var("PENCRAFT_RANKING_SUGGESTION_CAP") {
            if let Ok(cap) = cap.parse::<usize>() {
                self.ranking.suggestion_cap = cap;
            }
        }
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.driver == SourceDriver::Rest {
            let missing = self
                .source
                .base_url
                .as_deref()
                .map_or(true, |u| u.trim().is_empty());
            if missing {
                return Err(ConfigError::ValidationError(
                    "source.base_url is required for the rest driver".to_string(),
                ));
            }
        }
        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "cache.ttl_seconds must be positive".to_string(),
            ));
        }
        if self.content.default_reading_time == 0 {
            return Err(ConfigError::ValidationError(
                "content.default_reading_time must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
