//! `agentmart auth`: sign up, sign in, sign out.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dialoguer::{Input, Password};

use crate::app::AppContext;
use crate::application::services::auth::{self, AuthMode};

/// Auth subcommands.
#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account and sign in
    Signup(LoginArgs),
    /// Sign in to an existing account
    Login(LoginArgs),
    /// Sign out and forget the local session
    Logout,
    /// Show who is signed in
    Whoami,
}

/// Account credentials.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: Option<String>,
    /// Account password
    #[arg(long, env = "AGENTMART_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Run the auth command.
///
/// # Errors
///
/// Returns an error if input is missing or invalid, or the server rejects
/// the call.
pub async fn run(app: &AppContext, cmd: AuthCommand) -> Result<()> {
    match cmd {
        AuthCommand::Signup(args) => login(app, AuthMode::SignUp, args).await,
        AuthCommand::Login(args) => login(app, AuthMode::SignIn, args).await,
        AuthCommand::Logout => {
            let reporter = app.reporter();
            auth::sign_out(&app.api, &app.session_store, &reporter).await
        }
        AuthCommand::Whoami => {
            let session = auth::current_session(&app.session_store).await?;
            app.renderer().render_session(&session)
        }
    }
}

async fn login(app: &AppContext, mode: AuthMode, args: LoginArgs) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => {
            anyhow::ensure!(app.can_prompt(), "Email is required. Pass --email.");
            Input::<String>::new()
                .with_prompt("Email")
                .interact_text()
                .context("reading email")?
        }
    };
    let password = match args.password {
        Some(password) => password,
        None => {
            anyhow::ensure!(
                app.can_prompt(),
                "Password is required. Pass --password or set AGENTMART_PASSWORD."
            );
            let prompt = Password::new().with_prompt("Password");
            let prompt = if mode == AuthMode::SignUp {
                prompt.with_confirmation("Confirm password", "Passwords do not match")
            } else {
                prompt
            };
            prompt.interact().context("reading password")?
        }
    };
    let reporter = app.reporter();
    let session =
        auth::authenticate(&app.api, &app.session_store, &reporter, mode, &email, &password)
            .await?;
    reporter.finish();
    if app.is_json() {
        app.renderer().render_session(&session)?;
    }
    Ok(())
}
