//! `agentmart agents`: browse the agent catalog.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::agents;
use crate::domain::catalog::AgentFilter;

/// Agents subcommands.
#[derive(Subcommand)]
pub enum AgentsCommand {
    /// List available agents
    List {
        /// Only agents in this category
        #[arg(long)]
        category: Option<String>,
        /// Match name, description or abilities
        #[arg(long)]
        search: Option<String>,
    },
    /// Show agent details, tools and required credentials
    Show {
        /// Agent id
        id: String,
    },
}

/// Run the agents command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the agent is unknown.
pub async fn run(app: &AppContext, cmd: AgentsCommand) -> Result<()> {
    let reporter = app.reporter();
    match cmd {
        AgentsCommand::List { category, search } => {
            let filter = AgentFilter { category, search };
            let list = agents::list_agents(&app.api, &reporter, &filter).await?;
            reporter.finish();
            app.renderer().render_agents(&list)
        }
        AgentsCommand::Show { id } => {
            let detail = agents::show_agent(&app.api, &reporter, &id).await?;
            reporter.finish();
            app.renderer().render_agent_detail(&detail)
        }
    }
}
