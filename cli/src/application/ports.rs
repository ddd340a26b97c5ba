//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `agentmart_common`: never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;

use agentmart_common::{
    Agent, AuthGrant, AuthRequest, Credential, CredentialRef, CredentialUpdate, NewCredential,
    PrebuiltTeam, Team, TeamCreateRequest, TeamCreated,
};
use anyhow::Result;
use thiserror::Error;

use crate::domain::config::AgentmartConfig;
use crate::domain::session::Session;

// ── API errors ────────────────────────────────────────────────────────────────

/// Fallback shown when the server gives no usable message.
pub const GENERIC_API_FAILURE: &str = "The marketplace request failed. Please try again.";

/// A failed marketplace call, already reduced to something a user can read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with an error status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The server could not be reached at all.
    #[error("Cannot reach the marketplace at {base_url}: {reason}")]
    Unreachable { base_url: String, reason: String },

    /// The server answered 2xx with a body of the wrong shape.
    #[error("Unexpected response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },
}

impl ApiError {
    /// Build a rejection, preferring the server's own message.
    #[must_use]
    pub fn rejected(status: u16, server_message: Option<&str>) -> Self {
        let message = server_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_API_FAILURE)
            .to_string();
        Self::Rejected { status, message }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}

// ── Marketplace API Port Traits ───────────────────────────────────────────────

/// Credential store operations.
#[allow(async_fn_in_trait)]
pub trait CredentialApi {
    /// All credentials the signed-in user has stored.
    async fn list_credentials(&self) -> Result<Vec<Credential>>;
    /// Store a new credential and return it as the server recorded it.
    async fn store_credential(&self, credential: &NewCredential) -> Result<Credential>;
    /// Replace the secret of an existing credential.
    async fn update_credential(&self, update: &CredentialUpdate) -> Result<()>;
    /// Delete one credential.
    async fn delete_credential(&self, credential: &CredentialRef) -> Result<()>;
}

/// Read-only agent catalog.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Every agent on the marketplace.
    async fn list_agents(&self) -> Result<Vec<Agent>>;
    /// Curated teams, each carrying its agents.
    async fn prebuilt_teams(&self) -> Result<Vec<PrebuiltTeam>>;
}

/// Team operations.
#[allow(async_fn_in_trait)]
pub trait TeamApi {
    /// Teams the signed-in user has created.
    async fn list_teams(&self) -> Result<Vec<Team>>;
    /// Submit a create-team request.
    async fn create_team(&self, request: &TeamCreateRequest) -> Result<TeamCreated>;
}

/// Account operations.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn sign_up(&self, request: &AuthRequest) -> Result<AuthGrant>;
    async fn sign_in(&self, request: &AuthRequest) -> Result<AuthGrant>;
    async fn sign_out(&self) -> Result<()>;
}

/// Composite trait: any type implementing all four sub-traits is a `MarketplaceApi`.
pub trait MarketplaceApi: CredentialApi + CatalogApi + TeamApi + AuthApi {}

/// Blanket implementation: any type implementing all four sub-traits is a `MarketplaceApi`.
impl<T> MarketplaceApi for T where T: CredentialApi + CatalogApi + TeamApi + AuthApi {}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State Ports ───────────────────────────────────────────────────────────────

/// Abstracts session persistence (load/save/clear).
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Load the current session, returning `None` when signed out.
    async fn load_async(&self) -> Result<Option<Session>>;
    /// Persist the given session.
    async fn save_async(&self, session: &Session) -> Result<()>;
    /// Forget the session. Succeeds when there is nothing to forget.
    async fn clear_async(&self) -> Result<()>;
}

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<AgentmartConfig>;
    /// Persist configuration.
    fn save(&self, config: &AgentmartConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
