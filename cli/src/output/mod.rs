//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;
pub mod views;

use agentmart_common::{Agent, Credential, PrebuiltTeam, Team, TeamCreated};
use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;
pub use styles::Styles;

use crate::application::services::agents::AgentDetail;
use crate::domain::config::AgentmartConfig;
use crate::domain::session::Session;
use views::{CredentialView, RequirementView, TeamCreatedView, grouped_views};

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an error message prefixed with `✗` to stderr. Never suppressed.
    pub fn error(&self, msg: &str) {
        eprintln!("  {} {msg}", "✗".style(self.styles.error));
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a section header. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("  {}", msg.style(self.styles.header));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Renderer for the current output mode.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_agents(&self, agents: &[Agent]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_agents(agents);
                Ok(())
            }
            Renderer::Json(r) => r.render(agents),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_agent_detail(&self, detail: &AgentDetail) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_agent_detail(detail);
                Ok(())
            }
            Renderer::Json(r) => r.render(&serde_json::json!({
                "agent": detail.agent,
                "requiredCredentials": detail.required,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_prebuilt(&self, teams: &[PrebuiltTeam]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_prebuilt(teams);
                Ok(())
            }
            Renderer::Json(r) => r.render(teams),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_credentials(&self, credentials: &[Credential], reveal: bool) -> Result<()> {
        let groups = grouped_views(credentials, reveal);
        match self {
            Renderer::Human(r) => {
                r.render_credential_groups(&groups);
                Ok(())
            }
            Renderer::Json(r) => r.render(&groups),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_credential(&self, credential: &Credential, reveal: bool) -> Result<()> {
        let view = CredentialView::new(credential, reveal);
        match self {
            Renderer::Human(r) => {
                r.render_credential(&view);
                Ok(())
            }
            Renderer::Json(r) => r.render(&view),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_teams(&self, teams: &[Team]) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_teams(teams);
                Ok(())
            }
            Renderer::Json(r) => r.render(teams),
        }
    }

    /// Requirements are progress information; JSON mode prints nothing.
    pub fn render_requirements(&self, rows: &[RequirementView]) {
        if let Renderer::Human(r) = self {
            r.render_requirements(rows);
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_team_created(&self, created: &TeamCreated) -> Result<()> {
        let view = TeamCreatedView::from(created);
        match self {
            Renderer::Human(r) => {
                r.render_team_created(&view);
                Ok(())
            }
            Renderer::Json(r) => r.render(&view),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_session(&self, session: &Session) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_session(session);
                Ok(())
            }
            Renderer::Json(r) => r.render(&serde_json::json!({
                "signedIn": true,
                "email": session.email,
            })),
        }
    }

    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(
        &self,
        config: &AgentmartConfig,
        path: &std::path::Path,
        effective: &str,
    ) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_config(config, path, effective);
                Ok(())
            }
            Renderer::Json(r) => r.render(&serde_json::json!({
                "path": path.display().to_string(),
                "config": config,
                "effectiveBaseUrl": effective,
            })),
        }
    }
}
