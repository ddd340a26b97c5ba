//! Application service: agents page use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use agentmart_common::{Agent, RequirementMap};
use anyhow::{Context, Result};

use crate::application::ports::{CatalogApi, ProgressReporter};
use crate::domain::catalog::{AgentFilter, select_by_ids};
use crate::domain::error::AgentError;
use crate::domain::requirements;

/// Fetch the catalog and apply `filter`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list_agents(
    api: &impl CatalogApi,
    reporter: &impl ProgressReporter,
    filter: &AgentFilter,
) -> Result<Vec<Agent>> {
    reporter.step("loading agents...");
    let agents = api.list_agents().await.context("loading agents")?;
    let total = agents.len();
    let agents = filter.apply(agents);
    tracing::debug!(total, shown = agents.len(), "agent catalog filtered");
    Ok(agents)
}

/// One agent together with the credentials it needs.
#[derive(Debug, Clone)]
pub struct AgentDetail {
    pub agent: Agent,
    pub required: RequirementMap,
}

/// Look up one agent by id.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or no agent has `id`.
pub async fn show_agent(
    api: &impl CatalogApi,
    reporter: &impl ProgressReporter,
    id: &str,
) -> Result<AgentDetail> {
    reporter.step(&format!("loading agent '{id}'..."));
    let agents = api.list_agents().await.context("loading agents")?;
    let agent = agents
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| AgentError::NotFound(id.to_string()))?;
    let required = requirements::resolve(std::slice::from_ref(&agent), Some(&agent));
    Ok(AgentDetail { agent, required })
}

/// Resolve agent ids against the catalog, keeping the given order.
///
/// # Errors
///
/// Returns an error if no ids are given, the catalog cannot be fetched, or
/// an id is unknown.
pub async fn pick_agents(api: &impl CatalogApi, ids: &[String]) -> Result<Vec<Agent>> {
    anyhow::ensure!(!ids.is_empty(), AgentError::NoAgentsSelected);
    let catalog = api.list_agents().await.context("loading agents")?;
    select_by_ids(&catalog, ids).map_err(|id| AgentError::NotFound(id).into())
}
