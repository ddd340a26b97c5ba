//! Credential drafts and stored-credential lookups.
//!
//! Pure functions only: no I/O, no async.

use std::sync::LazyLock;

use agentmart_common::{Credential, CredentialUpdate, NewCredential, SecretFieldSpec};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::domain::secret::{FieldErrors, SecretForm};

/// Credential keys are shared identifiers like `AWS_ACCESS_KEY`.
pub static CREDENTIAL_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Z0-9_]+$").expect("valid regex")
});

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_KEY_REQUIRED: &str = "Key is required";
pub const MSG_KEY_FORMAT: &str = "Key must contain only uppercase letters, digits and underscores";

#[must_use]
pub fn is_valid_credential_key(key: &str) -> bool {
    CREDENTIAL_KEY_RE.is_match(key)
}

/// A credential being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialDraft {
    pub name: String,
    pub key: String,
    pub secret: SecretForm,
}

/// Everything wrong with a draft. Empty means it may be submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub secret: FieldErrors,
}

impl DraftErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.key.is_none() && self.secret.is_empty()
    }

    /// One line per problem, suitable for an error message.
    #[must_use]
    pub fn summary(&self, form: &SecretForm) -> String {
        let mut lines = Vec::new();
        if let Some(msg) = &self.name {
            lines.push(format!("  - name: {msg}"));
        }
        if let Some(msg) = &self.key {
            lines.push(format!("  - key: {msg}"));
        }
        for msg in self.secret.messages(form.fields()) {
            lines.push(format!("  - secret {msg}"));
        }
        lines.join("\n")
    }
}

impl CredentialDraft {
    /// A new credential, optionally pre-bound to a required key and seeded
    /// from that key's declared schema.
    #[must_use]
    pub fn new(key: Option<&str>, schema: Option<&[SecretFieldSpec]>) -> Self {
        Self {
            name: String::new(),
            key: key.unwrap_or_default().to_string(),
            secret: SecretForm::seed(schema, None),
        }
    }

    /// A draft editing `existing`. A declared schema takes precedence over
    /// the stored secret when seeding rows.
    #[must_use]
    pub fn editing(existing: &Credential, schema: Option<&[SecretFieldSpec]>) -> Self {
        Self {
            name: existing.name.clone(),
            key: existing.key.clone(),
            secret: SecretForm::seed(schema, Some(&existing.secret)),
        }
    }

    /// Validate name, key and secret rows independently.
    #[must_use]
    pub fn validate(&self) -> DraftErrors {
        let name = self
            .name
            .trim()
            .is_empty()
            .then(|| MSG_NAME_REQUIRED.to_string());
        let key = if self.key.trim().is_empty() {
            Some(MSG_KEY_REQUIRED.to_string())
        } else if !is_valid_credential_key(&self.key) {
            Some(MSG_KEY_FORMAT.to_string())
        } else {
            None
        };
        DraftErrors {
            name,
            key,
            secret: self.secret.validate(),
        }
    }

    /// Body for the store-credential call, or the validation errors that
    /// block it.
    pub fn to_new_credential(&self) -> Result<NewCredential, DraftErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewCredential {
            key: self.key.clone(),
            secret: self.secret.to_secret_json(),
            name: self.name.trim().to_string(),
        })
    }

    /// Body for the update-credential call.
    pub fn to_update(&self) -> Result<CredentialUpdate, DraftErrors> {
        let new = self.to_new_credential()?;
        Ok(CredentialUpdate {
            key: new.key,
            name: new.name,
            value: new.secret,
        })
    }
}

/// Group stored credentials by key, keeping first-seen key order. Several
/// credentials may share a key (two AWS accounts, say).
#[must_use]
pub fn group_by_key(credentials: &[Credential]) -> IndexMap<&str, Vec<&Credential>> {
    let mut groups: IndexMap<&str, Vec<&Credential>> = IndexMap::new();
    for credential in credentials {
        groups.entry(credential.key.as_str()).or_default().push(credential);
    }
    groups
}

/// Stored credentials usable for `key`.
#[must_use]
pub fn candidates_for<'a>(credentials: &'a [Credential], key: &str) -> Vec<&'a Credential> {
    credentials.iter().filter(|c| c.key == key).collect()
}

/// Find a stored credential by key and display name.
#[must_use]
pub fn find_stored<'a>(
    credentials: &'a [Credential],
    key: &str,
    name: &str,
) -> Option<&'a Credential> {
    credentials.iter().find(|c| c.key == key && c.name == name)
}

/// Mask a secret for display, keeping only its shape.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(secret) {
        Ok(serde_json::Value::Object(map)) => {
            let fields: Vec<String> = map.keys().map(|k| format!("{k}: ••••")).collect();
            format!("{{{}}}", fields.join(", "))
        }
        _ => "••••".to_string(),
    }
}
