//! Application service: the add/edit credential modal.
//!
//! A draft is validated locally first. Nothing is sent while any field has
//! an error; the server is only called with a clean draft.

use agentmart_common::{Agent, Credential, SecretFieldSpec};
use anyhow::{Context, Result};

use crate::application::ports::{CredentialApi, ProgressReporter};
use crate::domain::credential::CredentialDraft;
use crate::domain::error::CredentialError;
use crate::domain::requirements;

/// Where the schema for a new credential comes from.
#[derive(Debug, Clone, Copy)]
pub enum SchemaSource<'a> {
    /// Free-form secret with a single blank row.
    None,
    /// The schema a tool declares for the key.
    Tool { tool_id: &'a str },
    /// Whatever schema the given agents' tools declare for the key.
    Agents,
}

/// Declared field schema for `key` among `agents`, narrowed by `source`.
///
/// # Errors
///
/// Returns an error if a tool is named that no agent carries, or that tool
/// has no schema for `key`.
pub fn schema_for(
    agents: &[Agent],
    key: &str,
    source: SchemaSource<'_>,
) -> Result<Option<Vec<SecretFieldSpec>>> {
    match source {
        SchemaSource::None => Ok(None),
        SchemaSource::Agents => Ok(requirements::secret_schema_for(agents, key)),
        SchemaSource::Tool { tool_id } => {
            let tool = agents
                .iter()
                .flat_map(|a| &a.tools)
                .find(|t| t.id == tool_id)
                .ok_or_else(|| anyhow::anyhow!("Tool '{tool_id}' not found on any agent."))?;
            let fields = tool
                .credentials
                .get(key)
                .map(|req| req.fields().to_vec())
                .filter(|f| !f.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!("Tool '{tool_id}' declares no secret fields for {key}.")
                })?;
            Ok(Some(fields))
        }
    }
}

fn ensure_valid(draft: &CredentialDraft) -> Result<()> {
    let errors = draft.validate();
    if !errors.is_empty() {
        return Err(CredentialError::ValidationFailed(errors.summary(&draft.secret)).into());
    }
    Ok(())
}

/// Store a new credential from `draft` and return it as stored.
///
/// # Errors
///
/// Returns an error if the draft is invalid (no request is sent) or the
/// server rejects it.
pub async fn create_credential(
    api: &impl CredentialApi,
    reporter: &impl ProgressReporter,
    draft: &CredentialDraft,
) -> Result<Credential> {
    ensure_valid(draft)?;
    let body = draft
        .to_new_credential()
        .map_err(|e| CredentialError::ValidationFailed(e.summary(&draft.secret)))?;
    reporter.step(&format!("storing credential '{}'...", body.name));
    let mut stored = api
        .store_credential(&body)
        .await
        .context("storing credential")?;
    // Fill in whatever the echo left out.
    if stored.key.is_empty() {
        stored.key.clone_from(&body.key);
    }
    if stored.name.is_empty() {
        stored.name.clone_from(&body.name);
    }
    if stored.secret.is_empty() {
        stored.secret = body.secret;
    }
    tracing::info!(key = %stored.key, name = %stored.name, "credential created");
    reporter.success(&format!("credential '{}' stored for {}", stored.name, stored.key));
    Ok(stored)
}

/// Replace the secret of an existing credential with the one in `draft`.
///
/// # Errors
///
/// Returns an error if the draft is invalid (no request is sent) or the
/// server rejects it.
pub async fn update_credential(
    api: &impl CredentialApi,
    reporter: &impl ProgressReporter,
    draft: &CredentialDraft,
) -> Result<()> {
    ensure_valid(draft)?;
    let body = draft
        .to_update()
        .map_err(|e| CredentialError::ValidationFailed(e.summary(&draft.secret)))?;
    reporter.step(&format!("updating credential '{}'...", body.name));
    api.update_credential(&body)
        .await
        .context("updating credential")?;
    tracing::info!(key = %body.key, name = %body.name, "credential updated");
    reporter.success(&format!("credential '{}' updated", body.name));
    Ok(())
}
