//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Browse AI agents, manage credentials and assemble teams
#[derive(Parser)]
#[command(
    name = "agentmart",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip prompts and confirmations
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse the agent catalog
    #[command(subcommand)]
    Agents(commands::agents::AgentsCommand),

    /// Browse pre-built teams
    Explore,

    /// Manage stored credentials
    #[command(subcommand)]
    Credentials(commands::credentials::CredentialsCommand),

    /// Create and list teams
    #[command(subcommand)]
    Teams(commands::teams::TeamsCommand),

    /// Sign up, sign in and sign out
    #[command(subcommand)]
    Auth(commands::auth::AuthCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            yes,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(());
        }

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        };
        let app = AppContext::new(&flags).await?;

        match command {
            Command::Agents(cmd) => commands::agents::run(&app, cmd).await,
            Command::Explore => commands::explore::run(&app).await,
            Command::Credentials(cmd) => commands::credentials::run(&app, cmd).await,
            Command::Teams(cmd) => commands::teams::run(&app, cmd).await,
            Command::Auth(cmd) => commands::auth::run(&app, cmd).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => Ok(()),
        }
    }
}
