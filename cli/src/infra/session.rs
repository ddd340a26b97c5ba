//! Infrastructure implementation of the `SessionStore` port.
//!
//! `SessionFile` provides async load/save/clear using
//! `tokio::task::spawn_blocking` with atomic write (temp file + rename) so a
//! crash never leaves a half-written token behind.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::SessionStore;
use crate::domain::session::Session;

/// Environment variable overriding the session file location.
pub const SESSION_PATH_ENV: &str = "AGENTMART_SESSION";

/// Session file manager: implements `SessionStore` for the infra layer.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Create a session store at `$AGENTMART_SESSION`, or
    /// `~/.agentmart/session.json` when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        if let Ok(val) = std::env::var(SESSION_PATH_ENV) {
            return Ok(Self::with_path(PathBuf::from(val)));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(Self::with_path(home.join(".agentmart").join("session.json")))
    }

    /// Create a session store with an explicit path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Synchronous load: used internally by `load_async` via `spawn_blocking`.
    fn load_sync(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading session file {}", self.path.display()))?;
        let session: Session = serde_json::from_str(&content)
            .with_context(|| format!("parsing session file {}", self.path.display()))?;
        if session.token.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Synchronous save: used internally by `save_async` via `spawn_blocking`.
    fn save_sync(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(session).context("serializing session")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing session file {}", self.path.display()))?;

        Ok(())
    }

    fn clear_sync(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing session file {}", self.path.display()))?;
        }
        Ok(())
    }
}

impl SessionStore for SessionFile {
    async fn load_async(&self) -> Result<Option<Session>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || SessionFile::with_path(path).load_sync())
            .await
            .context("session load task panicked")?
    }

    async fn save_async(&self, session: &Session) -> Result<()> {
        let path = self.path.clone();
        let session = session.clone();
        tokio::task::spawn_blocking(move || SessionFile::with_path(path).save_sync(&session))
            .await
            .context("session save task panicked")?
    }

    async fn clear_async(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || SessionFile::with_path(path).clear_sync())
            .await
            .context("session clear task panicked")?
    }
}
