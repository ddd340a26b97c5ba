//! Credential requirement resolution.
//!
//! Pure functions only. Given the agents a user has selected, work out
//! which credential keys the resulting team needs.

use agentmart_common::{Agent, RequirementMap, SecretFieldSpec};

/// Resolve the credential keys required by `agents`.
///
/// With a `focused` agent, exactly that agent's requirements are returned and
/// every other agent is ignored.
///
/// Otherwise the requirements are merged with an ordered fold over `agents`:
/// each agent's entries are written into the map in turn, so when two agents
/// declare the same key the description of the **last** one wins. The key
/// keeps the position at which it was first inserted.
#[must_use]
pub fn resolve(agents: &[Agent], focused: Option<&Agent>) -> RequirementMap {
    if let Some(agent) = focused {
        return agent.required_credentials.clone();
    }
    agents
        .iter()
        .flat_map(|agent| agent.required_credentials.iter())
        .fold(RequirementMap::new(), |mut acc, (key, description)| {
            acc.insert(key.clone(), description.clone());
            acc
        })
}

/// Find the declared secret schema for `key` among the agents' tools.
///
/// Follows the same tie-break as [`resolve`]: when several tools declare a
/// schema for the key, the last one encountered wins. Returns `None` when no
/// tool declares sub-fields for the key.
#[must_use]
pub fn secret_schema_for(agents: &[Agent], key: &str) -> Option<Vec<SecretFieldSpec>> {
    agents
        .iter()
        .flat_map(|agent| agent.tools.iter())
        .filter_map(|tool| tool.credentials.get(key))
        .rfind(|req| !req.fields().is_empty())
        .map(|req| req.fields().to_vec())
}
