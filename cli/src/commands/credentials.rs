//! `agentmart credentials`: list, add, edit and delete stored credentials.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::CatalogApi;
use crate::application::services::credential_crud;
use crate::application::services::credential_modal::{self, SchemaSource};
use crate::commands::prompt;
use crate::domain::credential::CredentialDraft;
use crate::domain::error::{AgentError, CredentialError};
use crate::domain::requirements;

/// Credentials subcommands.
#[derive(Subcommand)]
pub enum CredentialsCommand {
    /// List stored credentials grouped by key
    List {
        /// Print secret payloads instead of masking them
        #[arg(long)]
        reveal: bool,
    },
    /// Store a new credential
    Add {
        /// Credential key, e.g. AWS_ACCESS_KEY
        #[arg(long)]
        key: Option<String>,
        /// Display name, e.g. "Prod AWS"
        #[arg(long)]
        name: Option<String>,
        /// Secret field as KEY=VALUE (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Seed fields from the schema this tool declares for the key
        #[arg(long, conflicts_with = "for_agent")]
        tool: Option<String>,
        /// Seed from the requirement this agent declares for the key
        #[arg(long, value_name = "AGENT_ID")]
        for_agent: Option<String>,
    },
    /// Change the secret of a stored credential
    Edit {
        /// Credential key
        key: String,
        /// Credential name
        name: String,
        /// Secret field as KEY=VALUE (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a stored credential
    Delete {
        /// Credential key
        key: String,
        /// Credential name
        name: String,
    },
}

/// Run the credentials command.
///
/// # Errors
///
/// Returns an error if not signed in, input is invalid, or the server
/// rejects the call.
pub async fn run(app: &AppContext, cmd: CredentialsCommand) -> Result<()> {
    app.require_session()?;
    match cmd {
        CredentialsCommand::List { reveal } => list(app, reveal).await,
        CredentialsCommand::Add {
            key,
            name,
            fields,
            tool,
            for_agent,
        } => add(app, key, name, &fields, tool, for_agent).await,
        CredentialsCommand::Edit { key, name, fields } => edit(app, &key, &name, &fields).await,
        CredentialsCommand::Delete { key, name } => delete(app, &key, &name).await,
    }
}

async fn list(app: &AppContext, reveal: bool) -> Result<()> {
    let reporter = app.reporter();
    let creds = credential_crud::list_credentials(&app.api, &reporter).await?;
    reporter.finish();
    app.renderer()
        .render_credentials(&creds, reveal || app.config.output.reveal_secrets)
}

async fn add(
    app: &AppContext,
    key: Option<String>,
    name: Option<String>,
    fields: &[String],
    tool: Option<String>,
    for_agent: Option<String>,
) -> Result<()> {
    let reporter = app.reporter();
    let mut key = key;

    let schema = if tool.is_some() || for_agent.is_some() {
        let catalog = app.api.list_agents().await?;
        let agents = match &for_agent {
            Some(id) => {
                let agent = catalog
                    .into_iter()
                    .find(|a| &a.id == id)
                    .ok_or_else(|| AgentError::NotFound(id.clone()))?;
                let required = requirements::resolve(std::slice::from_ref(&agent), Some(&agent));
                match &key {
                    Some(k) if !required.contains_key(k) => {
                        return Err(CredentialError::NotRequired(k.clone()).into());
                    }
                    None if required.len() == 1 => {
                        key = required.keys().next().cloned();
                    }
                    _ => {}
                }
                vec![agent]
            }
            None => catalog,
        };
        let source = match &tool {
            Some(tool_id) => SchemaSource::Tool { tool_id },
            None => SchemaSource::Agents,
        };
        match &key {
            Some(k) => credential_modal::schema_for(&agents, k, source)?,
            None => None,
        }
    } else {
        None
    };

    let mut draft = CredentialDraft::new(key.as_deref(), schema.as_deref());
    draft.name = name.unwrap_or_default();
    credential_crud::apply_field_edits(&mut draft, fields)?;
    if app.can_prompt() {
        prompt::complete_draft(app, &mut draft, false)?;
    }

    let created = credential_modal::create_credential(&app.api, &reporter, &draft).await?;
    reporter.finish();
    app.renderer()
        .render_credential(&created, app.config.output.reveal_secrets)
}

async fn edit(app: &AppContext, key: &str, name: &str, fields: &[String]) -> Result<()> {
    let reporter = app.reporter();
    let mut draft = credential_crud::open_for_edit(&app.api, &reporter, key, name).await?;
    reporter.finish();
    if fields.is_empty() {
        anyhow::ensure!(
            app.can_prompt(),
            "Nothing to change. Pass --field KEY=VALUE or run interactively."
        );
        prompt::prompt_secret_edits(&mut draft)?;
    } else {
        credential_crud::apply_field_edits(&mut draft, fields)?;
    }
    credential_modal::update_credential(&app.api, &reporter, &draft).await?;
    Ok(())
}

async fn delete(app: &AppContext, key: &str, name: &str) -> Result<()> {
    if !app.confirm(&format!("Delete credential '{name}' ({key})?"), true)? {
        app.output.info("Cancelled.");
        return Ok(());
    }
    let reporter = app.reporter();
    credential_crud::delete_credential(&app.api, &reporter, key, name).await
}
