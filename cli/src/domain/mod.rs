//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod catalog;
pub mod config;
pub mod credential;
pub mod error;
pub mod modal;
pub mod requirements;
pub mod secret;
pub mod selection;
pub mod session;
pub mod team;

pub use config::{AgentmartConfig, validate_config_key, validate_config_value};
pub use credential::CredentialDraft;
pub use error::{AgentError, ConfigError, CredentialError, SecretFormError, SessionError};
pub use secret::SecretForm;
pub use selection::CredentialSelection;
pub use session::Session;
pub use team::Provision;
