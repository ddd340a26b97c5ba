//! Application service: pre-built team browsing.

use agentmart_common::PrebuiltTeam;
use anyhow::{Context, Result};

use crate::application::ports::{CatalogApi, ProgressReporter};
use crate::domain::error::AgentError;

/// All curated teams.
///
/// # Errors
///
/// Returns an error if the teams cannot be fetched.
pub async fn list_prebuilt(
    api: &impl CatalogApi,
    reporter: &impl ProgressReporter,
) -> Result<Vec<PrebuiltTeam>> {
    reporter.step("loading pre-built teams...");
    api.prebuilt_teams().await.context("loading pre-built teams")
}

/// The curated team for `category`, matched case-insensitively.
///
/// # Errors
///
/// Returns an error if the teams cannot be fetched or none matches.
pub async fn find_prebuilt(
    api: &impl CatalogApi,
    reporter: &impl ProgressReporter,
    category: &str,
) -> Result<PrebuiltTeam> {
    let teams = list_prebuilt(api, reporter).await?;
    let team = teams
        .into_iter()
        .find(|t| t.category.eq_ignore_ascii_case(category))
        .ok_or_else(|| AgentError::TeamNotFound(category.to_string()))?;
    anyhow::ensure!(
        !team.agents.is_empty(),
        "Pre-built team '{}' has no agents.",
        team.category
    );
    Ok(team)
}
