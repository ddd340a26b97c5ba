//! Application context: unified state passed to every command handler.
//!
//! `AppContext` gathers the output context, the config and session stores,
//! and the marketplace client built from them. Adding a new cross-cutting
//! concern requires only one field change here, and no command signature
//! change.

use anyhow::Result;

use crate::application::ports::{ConfigStore, SessionStore};
use crate::domain::config::{API_URL_ENV, AgentmartConfig};
use crate::domain::session::Session;
use crate::infra::api::HttpMarketplaceApi;
use crate::infra::config::YamlConfigStore;
use crate::infra::session::SessionFile;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `AGENTMART_YES` env vars).
    pub yes: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
}

/// Unified application context passed to every command handler.
///
/// Constructed once in `Cli::run()` and passed as `&AppContext` to all
/// command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Configuration file store.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at startup.
    pub config: AgentmartConfig,
    /// Session file store.
    pub session_store: SessionFile,
    /// Session loaded at startup, `None` when signed out.
    pub session: Option<Session>,
    /// Marketplace client carrying the session's token.
    pub api: HttpMarketplaceApi,
    /// When `true`, skip interactive prompts and use defaults.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `AGENTMART_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or the home
    /// directory cannot be determined. An unreadable session file counts as
    /// signed out.
    pub async fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("AGENTMART_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // JSON mode keeps stdout to the single result document.
        let output = OutputContext::new(
            flags.output.no_color,
            flags.output.quiet || flags.output.json,
        );

        let config_store = YamlConfigStore;
        let config = config_store.load()?;
        let session_store = SessionFile::new()?;
        let session = session_store.load_async().await.unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable session file");
            None
        });

        let env_url = std::env::var(API_URL_ENV).ok();
        let base_url = config.effective_base_url(env_url.as_deref());
        tracing::debug!(%base_url, signed_in = session.is_some(), "context ready");
        let api = HttpMarketplaceApi::new(&base_url, session.as_ref());

        Ok(Self {
            output,
            mode,
            config_store,
            config,
            session_store,
            session,
            api,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Progress reporter handed to application services.
    #[must_use]
    pub fn reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// The current session, or an error telling the user to sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if no session exists.
    pub fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| crate::domain::error::SessionError::NotSignedIn.into())
    }

    /// Whether prompts may be shown.
    #[must_use]
    pub fn can_prompt(&self) -> bool {
        !self.non_interactive && !self.is_json() && self.output.is_tty
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `AGENTMART_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}
