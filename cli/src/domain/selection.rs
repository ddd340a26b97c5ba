//! Which stored credential fills each required key.

use agentmart_common::{Credential, RequirementMap};
use indexmap::IndexMap;
use serde::Serialize;

/// Chosen credentials keyed by credential key.
///
/// Selections are only ever replaced, never cleared: choosing again for a
/// key overwrites the earlier choice. Drop the whole value to start over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CredentialSelection {
    selected: IndexMap<String, Credential>,
}

impl CredentialSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose `credential` for `key`. Last choice wins.
    pub fn select(&mut self, key: impl Into<String>, credential: Credential) {
        self.selected.insert(key.into(), credential);
    }

    #[must_use]
    pub fn is_satisfied(&self, key: &str) -> bool {
        self.selected.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Credential> {
        self.selected.get(key)
    }

    #[must_use]
    pub fn selected(&self) -> &IndexMap<String, Credential> {
        &self.selected
    }

    /// Required keys without a selection, in the required map's order.
    #[must_use]
    pub fn missing_keys(&self, required: &RequirementMap) -> Vec<String> {
        required
            .keys()
            .filter(|key| !self.is_satisfied(key))
            .cloned()
            .collect()
    }

    /// Whether a team may be submitted against `required`.
    #[must_use]
    pub fn can_submit(&self, required: &RequirementMap) -> bool {
        self.missing_keys(required).is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Credential> {
        self.selected
    }
}
