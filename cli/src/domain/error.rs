//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Secret form errors ────────────────────────────────────────────────────────

/// A mutation the secret form refused to apply.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretFormError {
    #[error("Fields are fixed by the tool's credential schema; no fields can be added.")]
    SchemaLocked,

    #[error("Field {0} does not exist.")]
    NoSuchField(usize),

    #[error("Field '{0}' is required and cannot be removed.")]
    RequiredField(String),

    #[error("The last remaining field cannot be removed.")]
    LastField,

    #[error("The key of field '{0}' is fixed and cannot be renamed.")]
    KeyLocked(String),
}

// ── Credential errors ─────────────────────────────────────────────────────────

/// Errors raised while resolving stored credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("No stored credential named '{name}' for key {key}.")]
    NotFound { key: String, name: String },

    #[error("Credential key {0} is not required by the selected agents.")]
    NotRequired(String),

    #[error("Credential validation failed:\n{0}")]
    ValidationFailed(String),

    #[error("Missing credentials: {0}")]
    Missing(String),

    #[error("Credential key {got} does not match the required key {expected}.")]
    KeyMismatch { expected: String, got: String },
}

// ── Agent errors ──────────────────────────────────────────────────────────────

/// Errors related to agent and team lookup.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Agent '{0}' not found.")]
    NotFound(String),

    #[error("Pre-built team '{0}' not found. List them with: agentmart explore")]
    TeamNotFound(String),

    #[error("Select at least one agent.")]
    NoAgentsSelected,

    #[error("Team name is required.")]
    MissingTeamName,
}

// ── Session errors ────────────────────────────────────────────────────────────

/// Errors related to the signed-in session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not signed in. Run: agentmart auth login")]
    NotSignedIn,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
