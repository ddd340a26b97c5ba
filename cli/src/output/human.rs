//! Human-readable terminal renderer.

use agentmart_common::{Agent, CredentialRequirement, PrebuiltTeam, Team};
use owo_colors::OwoColorize as _;

use crate::application::services::agents::AgentDetail;
use crate::domain::config::{API_URL_ENV, AgentmartConfig};
use crate::domain::session::Session;
use crate::output::OutputContext;
use crate::output::views::{CredentialView, RequirementView, TeamCreatedView};

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the agent catalog.
    pub fn render_agents(&self, agents: &[Agent]) {
        if agents.is_empty() {
            if !self.ctx.quiet {
                println!("No agents match. Try: agentmart agents list");
            }
            return;
        }
        for agent in agents {
            println!(
                "  {:<20} {:<28} {}",
                agent.id.style(self.ctx.styles.bold),
                agent.name,
                agent.category.style(self.ctx.styles.dim)
            );
            if !agent.description.is_empty() {
                println!("  {:<20} {}", "", agent.description.style(self.ctx.styles.dim));
            }
        }
        if !self.ctx.quiet {
            println!("\nShow one: agentmart agents show <id>");
        }
    }

    /// Render one agent with its tools and required credentials.
    pub fn render_agent_detail(&self, detail: &AgentDetail) {
        let agent = &detail.agent;
        println!();
        println!("  {}", agent.name.style(self.ctx.styles.header));
        println!();
        println!("  {:<14} {}", "Id:", agent.id);
        println!("  {:<14} {}", "Category:", agent.category);
        if !agent.status.is_empty() {
            println!("  {:<14} {}", "Status:", agent.status);
        }
        if !agent.description.is_empty() {
            println!("  {:<14} {}", "Description:", agent.description);
        }
        if !agent.abilities.is_empty() {
            println!("  {:<14} {}", "Abilities:", agent.abilities.join(", "));
        }

        if !agent.tools.is_empty() {
            println!();
            println!("  {}", "Tools:".style(self.ctx.styles.bold));
            for tool in &agent.tools {
                println!("    {} ({})", tool.name, tool.id.style(self.ctx.styles.dim));
                for (key, requirement) in &tool.credentials {
                    self.render_tool_requirement(key, requirement);
                }
            }
        }

        println!();
        println!("  {}", "Required credentials:".style(self.ctx.styles.bold));
        if detail.required.is_empty() {
            println!("    (none)");
        }
        for (key, description) in &detail.required {
            println!("    {:<24} {description}", key.style(self.ctx.styles.key));
        }
    }

    fn render_tool_requirement(&self, key: &str, requirement: &CredentialRequirement) {
        println!(
            "      {} {}",
            key.style(self.ctx.styles.key),
            requirement.description().style(self.ctx.styles.dim)
        );
        for field in requirement.fields() {
            let note = field.description.as_deref().unwrap_or_default();
            println!("        - {} ({}) {note}", field.key, field.field_type);
        }
    }

    /// Render pre-built teams.
    pub fn render_prebuilt(&self, teams: &[PrebuiltTeam]) {
        if teams.is_empty() {
            if !self.ctx.quiet {
                println!("No pre-built teams available.");
            }
            return;
        }
        for team in teams {
            println!(
                "  {:<16} {}",
                team.category.style(self.ctx.styles.bold),
                team.name
            );
            if !team.description.is_empty() {
                println!("  {:<16} {}", "", team.description.style(self.ctx.styles.dim));
            }
            let ids: Vec<&str> = team.agents.iter().map(|a| a.id.as_str()).collect();
            println!("  {:<16} agents: {}", "", ids.join(", "));
        }
        if !self.ctx.quiet {
            println!("\nRecruit one: agentmart teams recruit <category>");
        }
    }

    /// Render stored credentials grouped by key.
    pub fn render_credential_groups(
        &self,
        groups: &indexmap::IndexMap<String, Vec<CredentialView>>,
    ) {
        if groups.is_empty() {
            if !self.ctx.quiet {
                println!("No credentials stored. Add one: agentmart credentials add");
            }
            return;
        }
        for (key, creds) in groups {
            println!("  {}", key.style(self.ctx.styles.key));
            for cred in creds {
                println!("{}", self.credential_line(cred));
            }
        }
    }

    /// Render a single stored credential.
    pub fn render_credential(&self, cred: &CredentialView) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.kv("Key:", &cred.key);
        self.ctx.kv("Name:", &cred.name);
        self.ctx.kv("Secret:", &cred.secret);
    }

    /// Render the user's teams.
    pub fn render_teams(&self, teams: &[Team]) {
        if teams.is_empty() {
            if !self.ctx.quiet {
                println!(
                    "No teams yet. Create one: agentmart teams create --name <name> --agent <id>"
                );
            }
            return;
        }
        for team in teams {
            let created = team
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            println!(
                "  {:<24} {:<32} {}",
                team.id.style(self.ctx.styles.bold),
                team.name,
                created.style(self.ctx.styles.dim)
            );
            println!("  {:<24} agents: {}", "", team.agent_ids.join(", "));
        }
    }

    /// Render required credentials and their current selection.
    pub fn render_requirements(&self, rows: &[RequirementView]) {
        if self.ctx.quiet {
            return;
        }
        if rows.is_empty() {
            self.ctx.info("No credentials required.");
            return;
        }
        self.ctx.header("Required credentials:");
        for row in rows {
            println!("{}", self.requirement_line(row));
        }
    }

    /// One credential row: name, then the secret as given (masked or not).
    #[must_use]
    pub fn credential_line(&self, cred: &CredentialView) -> String {
        format!("    {:<24} {}", cred.name, cred.secret.style(self.ctx.styles.dim))
    }

    /// One requirement row with its selection status.
    #[must_use]
    pub fn requirement_line(&self, row: &RequirementView) -> String {
        let status = match &row.selected {
            Some(name) => format!("{} {name}", "✓".style(self.ctx.styles.success)),
            None => format!("{} missing", "✗".style(self.ctx.styles.error)),
        };
        format!(
            "    {:<24} {:<36} {status}",
            row.key.style(self.ctx.styles.key),
            row.description.style(self.ctx.styles.dim)
        )
    }

    /// Render a freshly created team. The dashboard path is printed even
    /// when quiet.
    pub fn render_team_created(&self, view: &TeamCreatedView) {
        if self.ctx.quiet {
            println!("{}", view.dashboard);
            return;
        }
        self.ctx.kv("Team:", &view.team_id);
        self.ctx.kv("Dashboard:", &view.dashboard);
    }

    /// Render the signed-in session.
    pub fn render_session(&self, session: &Session) {
        println!(
            "Signed in as {}",
            session.email.as_deref().unwrap_or("(unknown email)")
        );
    }

    /// Render the current configuration.
    pub fn render_config(&self, config: &AgentmartConfig, path: &std::path::Path, effective: &str) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<24} {}", "api.base_url:", config.api.base_url);
        println!("  {:<24} {}", "output.reveal_secrets:", config.output.reveal_secrets);
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        println!(
            "    {:<22} {}",
            format!("{API_URL_ENV}:"),
            std::env::var(API_URL_ENV).unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<22} {}",
            "AGENTMART_CONFIG:",
            std::env::var("AGENTMART_CONFIG").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!(
            "    {:<22} {}",
            "NO_COLOR:",
            std::env::var("NO_COLOR").unwrap_or_else(|_| "(not set)".to_string())
        );
        println!();
        println!("  {:<24} {effective}", "Effective API URL:");
    }
}
