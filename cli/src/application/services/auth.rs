//! Application service: sign-up, sign-in and sign-out.

use agentmart_common::AuthRequest;
use anyhow::{Context, Result};

use crate::application::ports::{AuthApi, ProgressReporter, SessionStore};
use crate::domain::error::SessionError;
use crate::domain::session::{Session, validate_email};

/// Which account call to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignUp,
    SignIn,
}

/// Sign up or in and persist the resulting session.
///
/// # Errors
///
/// Returns an error if the email is malformed, the password is empty, the
/// server rejects the credentials, or the session cannot be saved.
pub async fn authenticate(
    api: &impl AuthApi,
    store: &impl SessionStore,
    reporter: &impl ProgressReporter,
    mode: AuthMode,
    email: &str,
    password: &str,
) -> Result<Session> {
    validate_email(email)?;
    anyhow::ensure!(!password.is_empty(), "Password is required.");
    let request = AuthRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    let grant = match mode {
        AuthMode::SignUp => {
            reporter.step("creating account...");
            api.sign_up(&request).await.context("signing up")?
        }
        AuthMode::SignIn => {
            reporter.step("signing in...");
            api.sign_in(&request).await.context("signing in")?
        }
    };
    let session = Session {
        token: grant.token,
        email: grant.email.or(Some(request.email)),
    };
    store.save_async(&session).await.context("saving session")?;
    tracing::info!(email = ?session.email, "session started");
    reporter.success(&format!(
        "signed in as {}",
        session.email.as_deref().unwrap_or_default()
    ));
    Ok(session)
}

/// Sign out. The local session is cleared even when the server call fails;
/// that failure is reported as a warning.
///
/// # Errors
///
/// Returns an error if no session exists or it cannot be cleared.
pub async fn sign_out(
    api: &impl AuthApi,
    store: &impl SessionStore,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let session = store.load_async().await.context("loading session")?;
    anyhow::ensure!(session.is_some(), SessionError::NotSignedIn);
    reporter.step("signing out...");
    if let Err(e) = api.sign_out().await {
        tracing::warn!(error = %e, "server sign-out failed");
        reporter.warn(&format!("server sign-out failed: {e:#}"));
    }
    store.clear_async().await.context("clearing session")?;
    reporter.success("signed out");
    Ok(())
}

/// The current session.
///
/// # Errors
///
/// Returns an error if no session exists or it cannot be read.
pub async fn current_session(store: &impl SessionStore) -> Result<Session> {
    store
        .load_async()
        .await
        .context("loading session")?
        .ok_or_else(|| SessionError::NotSignedIn.into())
}
