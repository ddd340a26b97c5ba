//! Signed-in session.
//!
//! The dashboard keeps two values across runs: the bearer token and the
//! user's email. They live together in one [`Session`].

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::SessionError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
});

/// Persisted session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Bearer token attached to every authenticated request.
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Validate an email address before it is sent for sign-up or sign-in.
///
/// # Errors
///
/// Returns an error if the address is obviously malformed.
pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(SessionError::InvalidEmail(email.to_string()).into());
    }
    Ok(())
}
