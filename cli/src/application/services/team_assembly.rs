//! Application service: the team assembly page.
//!
//! A [`TeamAssembly`] holds the chosen agents, the credential keys they
//! need and the credentials picked for each key. It is created once per
//! flow and dropped when the flow ends; nothing is persisted.

use agentmart_common::{
    Agent, Credential, RequirementMap, SecretFieldSpec, Team, TeamCreateRequest, TeamCreated,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::application::ports::{CredentialApi, ProgressReporter, TeamApi};
use crate::application::services::credential_modal;
use crate::domain::credential::{CredentialDraft, candidates_for, find_stored};
use crate::domain::error::{AgentError, CredentialError};
use crate::domain::requirements;
use crate::domain::selection::CredentialSelection;
use crate::domain::team::{Provision, build_team_request};

/// Teams the user has already created.
///
/// # Errors
///
/// Returns an error if the teams cannot be fetched.
pub async fn list_teams(api: &impl TeamApi, reporter: &impl ProgressReporter) -> Result<Vec<Team>> {
    reporter.step("loading teams...");
    api.list_teams().await.context("loading teams")
}

/// State of one team assembly flow.
#[derive(Debug)]
pub struct TeamAssembly {
    agents: Vec<Agent>,
    required: RequirementMap,
    stored: Vec<Credential>,
    selection: CredentialSelection,
}

impl TeamAssembly {
    /// Start a flow for `agents` (in selection order) against the user's
    /// stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if `agents` is empty.
    pub fn new(agents: Vec<Agent>, stored: Vec<Credential>) -> Result<Self> {
        anyhow::ensure!(!agents.is_empty(), AgentError::NoAgentsSelected);
        let required = requirements::resolve(&agents, None);
        Ok(Self {
            agents,
            required,
            stored,
            selection: CredentialSelection::new(),
        })
    }

    /// Fetch stored credentials and start a flow.
    ///
    /// # Errors
    ///
    /// Returns an error if `agents` is empty or credentials cannot be fetched.
    pub async fn load(
        api: &impl CredentialApi,
        reporter: &impl ProgressReporter,
        agents: Vec<Agent>,
    ) -> Result<Self> {
        anyhow::ensure!(!agents.is_empty(), AgentError::NoAgentsSelected);
        reporter.step("loading credentials...");
        let stored = api
            .list_credentials()
            .await
            .context("loading credentials")?;
        Self::new(agents, stored)
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn required(&self) -> &RequirementMap {
        &self.required
    }

    #[must_use]
    pub fn selection(&self) -> &CredentialSelection {
        &self.selection
    }

    /// Stored credentials usable for `key`.
    #[must_use]
    pub fn candidates(&self, key: &str) -> Vec<&Credential> {
        candidates_for(&self.stored, key)
    }

    /// Declared field schema for `key`, if any tool of the chosen agents has one.
    #[must_use]
    pub fn schema_for(&self, key: &str) -> Option<Vec<SecretFieldSpec>> {
        requirements::secret_schema_for(&self.agents, key)
    }

    /// A blank create-credential draft pre-bound to `key`.
    #[must_use]
    pub fn draft_for(&self, key: &str) -> CredentialDraft {
        CredentialDraft::new(Some(key), self.schema_for(key).as_deref())
    }

    /// Required keys still without a credential, in required order.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        self.selection.missing_keys(&self.required)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selection.can_submit(&self.required)
    }

    /// Choose `credential` for `key`, replacing any earlier choice.
    pub fn select(&mut self, key: &str, credential: Credential) {
        tracing::debug!(%key, name = %credential.name, "credential selected");
        self.selection.select(key, credential);
    }

    /// Choose the stored credential named `name` for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not required or no such credential exists.
    pub fn select_stored(&mut self, key: &str, name: &str) -> Result<()> {
        if !self.required.contains_key(key) {
            return Err(CredentialError::NotRequired(key.to_string()).into());
        }
        let credential = find_stored(&self.stored, key, name)
            .cloned()
            .ok_or_else(|| CredentialError::NotFound {
                key: key.to_string(),
                name: name.to_string(),
            })?;
        self.select(key, credential);
        Ok(())
    }

    /// Create a credential from `draft` and select it for `key`, the
    /// requirement the create flow was opened for.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft's key differs from `key`, the draft is
    /// invalid or the server rejects it; nothing is sent or selected then.
    pub async fn fulfil_with_new_credential(
        &mut self,
        api: &impl CredentialApi,
        reporter: &impl ProgressReporter,
        key: &str,
        draft: &CredentialDraft,
    ) -> Result<Credential> {
        if draft.key.trim() != key {
            return Err(CredentialError::KeyMismatch {
                expected: key.to_string(),
                got: draft.key.trim().to_string(),
            }
            .into());
        }
        let created = credential_modal::create_credential(api, reporter, draft).await?;
        self.stored.push(created.clone());
        self.select(key, created.clone());
        Ok(created)
    }

    /// Build the create-team request.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or a required key is unselected.
    pub fn build_request(
        &self,
        name: &str,
        description: &str,
        provision: &Provision,
        now: DateTime<Utc>,
    ) -> Result<TeamCreateRequest> {
        anyhow::ensure!(!name.trim().is_empty(), AgentError::MissingTeamName);
        let missing = self.missing_keys();
        if !missing.is_empty() {
            return Err(CredentialError::Missing(missing.join(", ")).into());
        }
        Ok(build_team_request(
            name.trim(),
            description,
            &self.agents,
            &self.selection,
            provision,
            now,
        ))
    }

    /// Build and submit the team. A failed submission is returned as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the server
    /// rejects it.
    pub async fn submit(
        &self,
        api: &impl TeamApi,
        reporter: &impl ProgressReporter,
        name: &str,
        description: &str,
        provision: &Provision,
        now: DateTime<Utc>,
    ) -> Result<TeamCreated> {
        let request = self.build_request(name, description, provision, now)?;
        reporter.step(&format!("creating team '{}'...", request.name));
        let created = api.create_team(&request).await.context("creating team")?;
        tracing::info!(
            team_id = %created.team_id,
            agents = request.team.agent_ids.len(),
            "team submitted"
        );
        reporter.success(&format!("team '{}' created", request.name));
        Ok(created)
    }
}
