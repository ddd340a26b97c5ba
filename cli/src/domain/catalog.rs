//! Agent catalog filtering for the agents page.

use agentmart_common::Agent;

/// Filter applied to the agent list.
#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    /// Exact category match, case-insensitive.
    pub category: Option<String>,
    /// Substring search over name, description and abilities, case-insensitive.
    pub search: Option<String>,
}

impl AgentFilter {
    #[must_use]
    pub fn matches(&self, agent: &Agent) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|c| agent.category.eq_ignore_ascii_case(c));
        let search_ok = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .is_none_or(|q| {
                let q = q.to_lowercase();
                agent.name.to_lowercase().contains(&q)
                    || agent.description.to_lowercase().contains(&q)
                    || agent.abilities.iter().any(|a| a.to_lowercase().contains(&q))
            });
        category_ok && search_ok
    }

    /// Agents passing the filter, in their original order.
    #[must_use]
    pub fn apply(&self, agents: Vec<Agent>) -> Vec<Agent> {
        agents.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Distinct categories in first-seen order.
#[must_use]
pub fn categories(agents: &[Agent]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for agent in agents {
        if !agent.category.is_empty() && !out.contains(&agent.category.as_str()) {
            out.push(&agent.category);
        }
    }
    out
}

/// Pick agents by id, in the order the ids were given. Repeated ids are
/// selected once.
///
/// # Errors
///
/// Returns the first id that does not name a known agent.
pub fn select_by_ids(agents: &[Agent], ids: &[String]) -> Result<Vec<Agent>, String> {
    let mut picked: Vec<Agent> = Vec::new();
    for id in ids {
        if picked.iter().any(|a| &a.id == id) {
            continue;
        }
        let agent = agents.iter().find(|a| &a.id == id).ok_or_else(|| id.clone())?;
        picked.push(agent.clone());
    }
    Ok(picked)
}
