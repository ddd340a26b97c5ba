//! Team assembly: turns a selection into a create-team request body.
//!
//! Building never touches the network; the caller submits the result.

use agentmart_common::{Agent, ProvisionKind, TeamCreateRequest, TeamPayload};
use chrono::{DateTime, Utc};

use crate::domain::selection::CredentialSelection;

/// Where a team comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provision {
    /// Assembled by the user from individual agents.
    Custom,
    /// Recruited from a curated team; its category doubles as the team id.
    Prebuilt { category: String, image: Option<String> },
}

/// Description used when the user leaves it blank.
#[must_use]
pub fn default_description(agent_count: usize) -> String {
    format!("Custom team with {agent_count} agents")
}

/// Client-side id for a custom team.
#[must_use]
pub fn custom_team_id(now: DateTime<Utc>) -> String {
    format!("team-{}", now.timestamp_millis())
}

/// Build the create-team request.
///
/// `agents` must be in the order the user selected them; `agentIds` keeps
/// that order.
#[must_use]
pub fn build_team_request(
    name: &str,
    description: &str,
    agents: &[Agent],
    selection: &CredentialSelection,
    provision: &Provision,
    now: DateTime<Utc>,
) -> TeamCreateRequest {
    let description = if description.trim().is_empty() {
        default_description(agents.len())
    } else {
        description.to_string()
    };
    let (id, image, kind) = match provision {
        Provision::Custom => (custom_team_id(now), String::new(), ProvisionKind::Custom),
        Provision::Prebuilt { category, image } => (
            category.clone(),
            image.clone().unwrap_or_default(),
            ProvisionKind::Prebuilt,
        ),
    };
    TeamCreateRequest {
        name: name.to_string(),
        provision: kind,
        team: TeamPayload {
            id,
            name: name.to_string(),
            description,
            image,
            agent_ids: agents.iter().map(|a| a.id.clone()).collect(),
            credentials: selection.selected().clone(),
        },
    }
}
