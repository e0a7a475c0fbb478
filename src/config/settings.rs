use serde::Deserialize;

use crate::utils::constants::{DEFAULT_AUTH_HEADER, DEFAULT_LOG_LEVEL, DEFAULT_STORE_PATH};

/// ================================
/// Top-level config file
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RelayConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    /// When absent the endpoint is taken from the environment.
    pub forward: Option<ForwardConfig>,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    pub logging: Option<LoggingConfig>,
}

/// ================================
/// Local append
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { path: default_store_path() }
    }
}

/// ================================
/// Remote forward
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ForwardConfig {
    pub url: String,
    pub key: String,
    /// name of the header carrying `key`
    #[serde(default = "default_auth_header")]
    pub header: String,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new(default_log_level(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}

fn default_store_path() -> String {
    DEFAULT_STORE_PATH.to_string()
}

fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
