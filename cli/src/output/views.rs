//! Serializable views shared by the human and JSON renderers.

use agentmart_common::{Credential, RequirementMap, TeamCreated};
use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::credential::{group_by_key, mask_secret};

/// A stored credential as shown to the user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CredentialView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub key: String,
    pub name: String,
    pub secret: String,
}

impl CredentialView {
    /// View of `credential`, masking the secret unless `reveal`.
    #[must_use]
    pub fn new(credential: &Credential, reveal: bool) -> Self {
        Self {
            id: credential.id.clone(),
            key: credential.key.clone(),
            name: credential.name.clone(),
            secret: if reveal {
                credential.secret.clone()
            } else {
                mask_secret(&credential.secret)
            },
        }
    }
}

/// Credentials grouped by key, first-seen key order.
#[must_use]
pub fn grouped_views(
    credentials: &[Credential],
    reveal: bool,
) -> IndexMap<String, Vec<CredentialView>> {
    group_by_key(credentials)
        .into_iter()
        .map(|(key, creds)| {
            (
                key.to_string(),
                creds.into_iter().map(|c| CredentialView::new(c, reveal)).collect(),
            )
        })
        .collect()
}

/// Result of a team submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCreatedView {
    pub team_id: String,
    pub dashboard: String,
}

impl From<&TeamCreated> for TeamCreatedView {
    fn from(created: &TeamCreated) -> Self {
        Self {
            team_id: created.team_id.clone(),
            dashboard: created.dashboard_path(),
        }
    }
}

/// One required key and what fills it.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementView {
    pub key: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

/// Requirement rows in required order, with the chosen credential names.
#[must_use]
pub fn requirement_views(
    required: &RequirementMap,
    selected: &IndexMap<String, Credential>,
) -> Vec<RequirementView> {
    required
        .iter()
        .map(|(key, description)| RequirementView {
            key: key.clone(),
            description: description.clone(),
            selected: selected.get(key).map(|c| c.name.clone()),
        })
        .collect()
}
