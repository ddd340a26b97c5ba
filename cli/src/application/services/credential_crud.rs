//! Application service: credentials page use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use agentmart_common::{Credential, CredentialRef};
use anyhow::{Context, Result};

use crate::application::ports::{CatalogApi, CredentialApi, ProgressReporter};
use crate::domain::credential::{CredentialDraft, find_stored};
use crate::domain::error::CredentialError;
use crate::domain::requirements;

/// Every stored credential, in server order.
///
/// # Errors
///
/// Returns an error if the credentials cannot be fetched.
pub async fn list_credentials(
    api: &impl CredentialApi,
    reporter: &impl ProgressReporter,
) -> Result<Vec<Credential>> {
    reporter.step("loading credentials...");
    api.list_credentials().await.context("loading credentials")
}

/// Open the edit modal for the credential `(key, name)`.
///
/// Rows are re-seeded from the stored secret, or from the schema a tool
/// declares for `key` when there is one. A catalog that fails to load only
/// costs the schema.
///
/// # Errors
///
/// Returns an error if the credentials cannot be fetched or none matches.
pub async fn open_for_edit(
    api: &(impl CredentialApi + CatalogApi),
    reporter: &impl ProgressReporter,
    key: &str,
    name: &str,
) -> Result<CredentialDraft> {
    let stored = list_credentials(api, reporter).await?;
    let existing = find_stored(&stored, key, name).ok_or_else(|| CredentialError::NotFound {
        key: key.to_string(),
        name: name.to_string(),
    })?;
    let schema = match api.list_agents().await {
        Ok(agents) => requirements::secret_schema_for(&agents, key),
        Err(e) => {
            tracing::warn!(error = %e, "agent catalog unavailable, editing without schema");
            reporter.warn("agent catalog unavailable; editing without a field schema");
            None
        }
    };
    Ok(CredentialDraft::editing(existing, schema.as_deref()))
}

/// Apply `KEY=VALUE` edits to a draft's secret rows. Existing keys are
/// overwritten, new keys appended where the form allows it.
///
/// # Errors
///
/// Returns an error if an edit is not `KEY=VALUE` or the form refuses it.
pub fn apply_field_edits(draft: &mut CredentialDraft, edits: &[String]) -> Result<()> {
    for edit in edits {
        let (key, value) = edit
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Invalid field '{edit}'. Expected KEY=VALUE."))?;
        draft
            .secret
            .upsert(key.trim(), value)
            .with_context(|| format!("setting field '{}'", key.trim()))?;
    }
    Ok(())
}

/// Delete the credential `(key, name)`.
///
/// # Errors
///
/// Returns an error if the server rejects the deletion.
pub async fn delete_credential(
    api: &impl CredentialApi,
    reporter: &impl ProgressReporter,
    key: &str,
    name: &str,
) -> Result<()> {
    reporter.step(&format!("deleting credential '{name}'..."));
    api.delete_credential(&CredentialRef {
        key: key.to_string(),
        name: name.to_string(),
    })
    .await
    .context("deleting credential")?;
    tracing::info!(%key, %name, "credential deleted");
    reporter.success(&format!("credential '{name}' deleted from {key}"));
    Ok(())
}
