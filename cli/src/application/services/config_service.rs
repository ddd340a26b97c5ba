//! Application service: configuration use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::AgentmartConfig;

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<AgentmartConfig> {
    store.load()
}

/// Save configuration.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_config(store: &impl ConfigStore, config: &AgentmartConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist one `key = value` setting, returning the new config.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the file cannot be
/// read or written.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<AgentmartConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    save_config(store, &config)?;
    tracing::debug!(%key, %value, "config updated");
    Ok(config)
}
