//! Configuration for PermKit.
//!
//! Resolution order:
//! 1. Built-in defaults
//! 2. Optional JSON settings file
//! 3. Environment variables (highest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Complete PermKit configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Request coordination configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Correlation tag sent with every platform permission request and
    /// matched against incoming grant callbacks.
    pub request_code: u32,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self { request_code: 24 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default env-filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// Emit structured JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "permkit=info".to_string(),
            json: false,
        }
    }
}

/// Load configuration from an optional settings file plus environment
/// overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) if path.exists() => load_config_file(path)?,
        _ => Config::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })
}

fn apply_env_overrides(config: &mut Config, get: impl Fn(&str) -> Option<String>) {
    if let Some(val) = get("PERMKIT_REQUEST_CODE") {
        if let Ok(n) = val.parse() {
            config.broker.request_code = n;
        }
    }
    if let Some(val) = get("PERMKIT_LOG_LEVEL") {
        config.log.level = val;
    }
    if let Some(val) = get("PERMKIT_LOG_JSON") {
        config.log.json = val == "1" || val.eq_ignore_ascii_case("true");
    }
}
