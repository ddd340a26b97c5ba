//! Interactive prompts shared by the credential and team commands.
//!
//! Everything here talks to the terminal through `dialoguer` and is only
//! reached when `AppContext::can_prompt` holds.

use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};

use crate::app::AppContext;
use crate::application::services::team_assembly::TeamAssembly;
use crate::domain::credential::{CredentialDraft, is_valid_credential_key, mask_secret};
use crate::domain::error::CredentialError;
use crate::domain::modal::ModalState;
use crate::domain::secret::SecretField;

/// Split `KEY=VALUE`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is blank.
pub fn split_pair<'a>(raw: &'a str, what: &str) -> Result<(&'a str, &'a str)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid {what} '{raw}'. Expected KEY=VALUE."))?;
    anyhow::ensure!(
        !key.trim().is_empty(),
        "Invalid {what} '{raw}'. Key is empty."
    );
    Ok((key.trim(), value))
}

fn field_prompt(field: &SecretField) -> String {
    let label = if field.key.is_empty() {
        "value".to_string()
    } else {
        field.key.clone()
    };
    match &field.description {
        Some(desc) if !desc.is_empty() => format!("{label} ({}, {desc})", field.field_type),
        _ => format!("{label} ({})", field.field_type),
    }
}

/// Ask for a name and key when the draft lacks them.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn prompt_identity(draft: &mut CredentialDraft) -> Result<()> {
    if draft.key.trim().is_empty() {
        draft.key = Input::<String>::new()
            .with_prompt("Credential key (e.g. AWS_ACCESS_KEY)")
            .validate_with(|input: &String| {
                if is_valid_credential_key(input) {
                    Ok(())
                } else {
                    Err("use uppercase letters, digits and underscores")
                }
            })
            .interact_text()
            .context("reading credential key")?;
    }
    if draft.name.trim().is_empty() {
        draft.name = Input::<String>::new()
            .with_prompt(format!("Name for this {} credential", draft.key))
            .interact_text()
            .context("reading credential name")?;
    }
    Ok(())
}

/// Fill empty secret rows. Free-form forms may grow: after the existing rows
/// the user is offered more `key=value` pairs until an empty key.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn prompt_secret_rows(draft: &mut CredentialDraft) -> Result<()> {
    for index in 0..draft.secret.fields().len() {
        let field = draft.secret.fields()[index].clone();
        if !field.value.is_empty() {
            continue;
        }
        if field.key.is_empty() && !field.key_locked() {
            let key: String = Input::new()
                .with_prompt("Secret field key")
                .default(crate::domain::secret::DEFAULT_FIELD_KEY.to_string())
                .interact_text()
                .context("reading field key")?;
            draft.secret.set_key(index, key)?;
        }
        let field = &draft.secret.fields()[index];
        let value = Password::new()
            .with_prompt(field_prompt(field))
            .allow_empty_password(!field.required)
            .interact()
            .context("reading secret value")?;
        draft.secret.set_value(index, value)?;
    }
    while draft.secret.can_add_field() {
        let key: String = Input::new()
            .with_prompt("Another field key (empty to finish)")
            .allow_empty(true)
            .interact_text()
            .context("reading field key")?;
        if key.trim().is_empty() {
            break;
        }
        let value = Password::new()
            .with_prompt(key.trim())
            .interact()
            .context("reading secret value")?;
        draft.secret.upsert(key.trim(), &value)?;
    }
    Ok(())
}

/// Re-ask every row, keeping the current value on empty input.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn prompt_secret_edits(draft: &mut CredentialDraft) -> Result<()> {
    for index in 0..draft.secret.fields().len() {
        let field = draft.secret.fields()[index].clone();
        let value = Password::new()
            .with_prompt(format!("{} (empty keeps current)", field_prompt(&field)))
            .allow_empty_password(true)
            .interact()
            .context("reading secret value")?;
        if !value.is_empty() {
            draft.secret.set_value(index, value)?;
        }
    }
    Ok(())
}

/// Prompt until the draft validates, showing per-field errors between rounds.
/// With `key_fixed` the draft's key belongs to a requirement and is never
/// re-prompted.
///
/// # Errors
///
/// Returns an error if a prompt fails, the form refuses an edit, or a fixed
/// key is itself invalid.
pub fn complete_draft(
    app: &AppContext,
    draft: &mut CredentialDraft,
    key_fixed: bool,
) -> Result<()> {
    prompt_identity(draft)?;
    prompt_secret_rows(draft)?;
    loop {
        let errors = draft.validate();
        if errors.is_empty() {
            return Ok(());
        }
        if key_fixed && errors.key.is_some() {
            return Err(CredentialError::ValidationFailed(errors.summary(&draft.secret)).into());
        }
        app.output.warn("Please fix the following:");
        for line in errors.summary(&draft.secret).lines() {
            app.output.warn(line.trim());
        }
        if errors.name.is_some() || errors.key.is_some() {
            draft.name.clear();
            if errors.key.is_some() {
                draft.key.clear();
            }
            prompt_identity(draft)?;
        }
        for (&index, row) in &errors.secret.rows {
            if row.key.is_some() && !draft.secret.fields()[index].key_locked() {
                draft.secret.set_key(index, "")?;
            }
            draft.secret.set_value(index, "")?;
        }
        prompt_secret_rows(draft)?;
    }
}

/// Walk the missing keys of `assembly`, letting the user pick a stored
/// credential or create a new one for each.
///
/// # Errors
///
/// Returns an error if a prompt fails or a credential cannot be created.
pub async fn resolve_missing(app: &AppContext, assembly: &mut TeamAssembly) -> Result<()> {
    let mut modal = ModalState::new();
    let reporter = app.reporter();
    for key in assembly.missing_keys() {
        let description = assembly
            .required()
            .get(&key)
            .cloned()
            .unwrap_or_default();
        modal.open_picker(&key);
        loop {
            let revealed = modal.flags(&key).secret_revealed;
            let candidates: Vec<_> = assembly.candidates(&key).into_iter().cloned().collect();
            let mut items: Vec<String> = candidates
                .iter()
                .map(|c| {
                    let secret = if revealed {
                        c.secret.clone()
                    } else {
                        mask_secret(&c.secret)
                    };
                    format!("{}  {secret}", c.name)
                })
                .collect();
            items.push("+ Create new credential".to_string());
            if !candidates.is_empty() {
                items.push(if revealed { "Hide secrets" } else { "Show secrets" }.to_string());
            }
            let choice = Select::new()
                .with_prompt(format!("{key}: {description}"))
                .items(&items)
                .default(0)
                .interact()
                .context("choosing credential")?;

            if let Some(picked) = candidates.get(choice) {
                assembly.select(&key, picked.clone());
                break;
            }
            if choice == candidates.len() {
                let mut draft = assembly.draft_for(&key);
                complete_draft(app, &mut draft, true)?;
                assembly
                    .fulfil_with_new_credential(&app.api, &reporter, &key, &draft)
                    .await?;
                break;
            }
            modal.toggle_reveal(&key);
        }
        modal.close_picker(&key);
    }
    modal.reset();
    Ok(())
}
