//! `agentmart config`: show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::application::services::config_service;
use crate::domain::config::API_URL_ENV;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the key or value is invalid or the file cannot be
/// read or written.
pub fn run(app: &AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = config_service::load_config(&app.config_store)?;
    let path = app.config_store.path()?;
    let env_url = std::env::var(API_URL_ENV).ok();
    let effective = config.effective_base_url(env_url.as_deref());
    app.renderer().render_config(&config, &path, &effective)
}

fn set_config(app: &AppContext, key: &str, value: &str) -> Result<()> {
    let config = config_service::set_value(&app.config_store, key, value)?;
    app.output.success(&format!("Set {key} = {value}"));
    if app.is_json() {
        let path = app.config_store.path()?;
        let env_url = std::env::var(API_URL_ENV).ok();
        let effective = config.effective_base_url(env_url.as_deref());
        app.renderer().render_config(&config, &path, &effective)?;
    }
    Ok(())
}
