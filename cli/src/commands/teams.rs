//! `agentmart teams`: list, assemble and recruit teams.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use dialoguer::Input;

use crate::app::AppContext;
use crate::application::services::team_assembly::{self, TeamAssembly};
use crate::application::services::{agents, explore};
use crate::commands::prompt;
use crate::domain::error::AgentError;
use crate::domain::team::Provision;
use crate::output::views::requirement_views;

/// Teams subcommands.
#[derive(Subcommand)]
pub enum TeamsCommand {
    /// List your teams
    List,
    /// Assemble a custom team from individual agents
    Create(CreateArgs),
    /// Recruit a pre-built team by category
    Recruit(RecruitArgs),
}

/// Credential choices shared by `create` and `recruit`.
#[derive(Args)]
pub struct CredentialArgs {
    /// Use the stored credential NAME for KEY (repeatable)
    #[arg(long = "use", value_name = "KEY=NAME")]
    pub uses: Vec<String>,
}

/// Arguments for `teams create`.
#[derive(Args)]
pub struct CreateArgs {
    /// Team name
    #[arg(long)]
    pub name: Option<String>,
    /// Agent id, in the order the team should list them (repeatable)
    #[arg(long = "agent", value_name = "AGENT_ID", required = true)]
    pub agents: Vec<String>,
    /// Team description; defaults to "Custom team with N agents"
    #[arg(long, default_value = "")]
    pub description: String,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Arguments for `teams recruit`.
#[derive(Args)]
pub struct RecruitArgs {
    /// Pre-built team category, as listed by `agentmart explore`
    pub category: String,
    /// Team name; defaults to the pre-built team's name
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

/// Run the teams command.
///
/// # Errors
///
/// Returns an error if not signed in, input is invalid, credentials are
/// missing, or the server rejects the call.
pub async fn run(app: &AppContext, cmd: TeamsCommand) -> Result<()> {
    app.require_session()?;
    match cmd {
        TeamsCommand::List => {
            let reporter = app.reporter();
            let teams = team_assembly::list_teams(&app.api, &reporter).await?;
            reporter.finish();
            app.renderer().render_teams(&teams)
        }
        TeamsCommand::Create(args) => create(app, args).await,
        TeamsCommand::Recruit(args) => recruit(app, args).await,
    }
}

async fn create(app: &AppContext, args: CreateArgs) -> Result<()> {
    let reporter = app.reporter();
    let picked = agents::pick_agents(&app.api, &args.agents).await?;
    let mut assembly = TeamAssembly::load(&app.api, &reporter, picked).await?;
    reporter.finish();
    let name = team_name(app, args.name, None)?;
    assemble_and_submit(
        app,
        &mut assembly,
        &args.credentials,
        &name,
        &args.description,
        &Provision::Custom,
    )
    .await
}

async fn recruit(app: &AppContext, args: RecruitArgs) -> Result<()> {
    let reporter = app.reporter();
    let team = explore::find_prebuilt(&app.api, &reporter, &args.category).await?;
    let mut assembly = TeamAssembly::load(&app.api, &reporter, team.agents.clone()).await?;
    reporter.finish();
    let name = team_name(app, args.name, Some(&team.name))?;
    let provision = Provision::Prebuilt {
        category: team.category.clone(),
        image: team.image.clone(),
    };
    assemble_and_submit(
        app,
        &mut assembly,
        &args.credentials,
        &name,
        &team.description,
        &provision,
    )
    .await
}

fn team_name(app: &AppContext, given: Option<String>, fallback: Option<&str>) -> Result<String> {
    if let Some(name) = given.filter(|n| !n.trim().is_empty()) {
        return Ok(name);
    }
    if let Some(name) = fallback.filter(|n| !n.trim().is_empty()) {
        return Ok(name.to_string());
    }
    anyhow::ensure!(app.can_prompt(), AgentError::MissingTeamName);
    Input::<String>::new()
        .with_prompt("Team name")
        .interact_text()
        .context("reading team name")
}

async fn assemble_and_submit(
    app: &AppContext,
    assembly: &mut TeamAssembly,
    credentials: &CredentialArgs,
    name: &str,
    description: &str,
    provision: &Provision,
) -> Result<()> {
    for choice in &credentials.uses {
        let (key, cred_name) = prompt::split_pair(choice, "credential choice")?;
        assembly.select_stored(key, cred_name.trim())?;
    }
    if !assembly.can_submit() && app.can_prompt() {
        app.renderer().render_requirements(&requirement_views(
            assembly.required(),
            assembly.selection().selected(),
        ));
        prompt::resolve_missing(app, assembly).await?;
    }
    app.renderer().render_requirements(&requirement_views(
        assembly.required(),
        assembly.selection().selected(),
    ));

    let reporter = app.reporter();
    let created = assembly
        .submit(&app.api, &reporter, name, description, provision, Utc::now())
        .await?;
    reporter.finish();
    app.renderer().render_team_created(&created)
}
