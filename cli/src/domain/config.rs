//! Domain types and validators for agentmart configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const API_URL_ENV: &str = "AGENTMART_API_URL";

pub const VALID_CONFIG_KEYS: &[&str] = &["api.base_url", "output.reveal_secrets"];
pub const VALID_BOOLEANS: &[&str] = &["true", "false"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.agentmart/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AgentmartConfig {
    /// Marketplace API settings.
    pub api: ApiConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Marketplace API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Print stored secret payloads instead of masking them.
    #[serde(default)]
    pub reveal_secrets: bool,
}

impl AgentmartConfig {
    /// Base URL to use: the environment override when set and non-blank,
    /// else the configured value.
    #[must_use]
    pub fn effective_base_url(&self, env_override: Option<&str>) -> String {
        env_override
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.api.base_url.as_str())
            .trim_end_matches('/')
            .to_string()
    }

    /// Apply a validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "api.base_url" => self.api.base_url = value.to_string(),
            "output.reveal_secrets" => self.output.reveal_secrets = value == "true",
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let ok = match key {
        "api.base_url" => {
            (value.starts_with("http://") || value.starts_with("https://"))
                && value.len() > "https://".len()
        }
        "output.reveal_secrets" => VALID_BOOLEANS.contains(&value),
        _ => true,
    };
    if !ok {
        let valid = match key {
            "api.base_url" => "an http:// or https:// URL".to_string(),
            _ => VALID_BOOLEANS.join(", "),
        };
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            valid,
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
