//! Unit tests for sign-up, sign-in and sign-out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentmart_cli::application::services::auth::{self, AuthMode};
use agentmart_cli::domain::error::SessionError;

use crate::mocks::{FakeMarketplace, MemorySessionStore, RecordingReporter};

#[tokio::test]
async fn sign_in_persists_token_and_email() {
    let api = FakeMarketplace::default();
    let store = MemorySessionStore::default();
    let session = auth::authenticate(
        &api,
        &store,
        &RecordingReporter::default(),
        AuthMode::SignIn,
        " ada@example.com ",
        "hunter2",
    )
    .await
    .unwrap();
    assert_eq!(session.token, "tok-signin");
    assert_eq!(session.email.as_deref(), Some("ada@example.com"));
    assert_eq!(store.current(), Some(session));
    assert_eq!(api.recorded().sign_ins[0].email, "ada@example.com");
}

#[tokio::test]
async fn sign_up_falls_back_to_requested_email() {
    let api = FakeMarketplace::default();
    let store = MemorySessionStore::default();
    let session = auth::authenticate(
        &api,
        &store,
        &RecordingReporter::default(),
        AuthMode::SignUp,
        "grace@example.com",
        "pw",
    )
    .await
    .unwrap();
    assert_eq!(session.token, "tok-signup");
    assert_eq!(session.email.as_deref(), Some("grace@example.com"));
    assert_eq!(api.recorded().sign_ups.len(), 1);
}

#[tokio::test]
async fn malformed_email_is_refused_before_any_call() {
    let api = FakeMarketplace::default();
    let store = MemorySessionStore::default();
    let err = auth::authenticate(
        &api,
        &store,
        &RecordingReporter::default(),
        AuthMode::SignIn,
        "not-an-email",
        "pw",
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::InvalidEmail(_))
    ));
    assert!(api.recorded().sign_ins.is_empty());
    assert!(store.current().is_none());
}

#[tokio::test]
async fn rejected_sign_in_keeps_no_session() {
    let api = FakeMarketplace::default().rejecting("Invalid email or password");
    let store = MemorySessionStore::default();
    let err = auth::authenticate(
        &api,
        &store,
        &RecordingReporter::default(),
        AuthMode::SignIn,
        "ada@example.com",
        "wrong",
    )
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("Invalid email or password"));
    assert!(store.current().is_none());
}

#[tokio::test]
async fn sign_out_clears_even_when_server_fails() {
    let mut api = FakeMarketplace::default();
    api.sign_out_fails = true;
    let store = MemorySessionStore::signed_in("tok");
    let reporter = RecordingReporter::default();
    auth::sign_out(&api, &store, &reporter).await.unwrap();
    assert!(store.current().is_none());
    assert_eq!(api.recorded().sign_outs, 1);
    assert_eq!(reporter.warnings().len(), 1);
}

#[tokio::test]
async fn sign_out_without_session_is_an_error() {
    let api = FakeMarketplace::default();
    let store = MemorySessionStore::default();
    let err = auth::sign_out(&api, &store, &RecordingReporter::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::NotSignedIn)
    ));
    assert_eq!(api.recorded().sign_outs, 0);
}

#[tokio::test]
async fn current_session_reports_signed_out() {
    let err = auth::current_session(&MemorySessionStore::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Not signed in. Run: agentmart auth login");
    let session = auth::current_session(&MemorySessionStore::signed_in("tok"))
        .await
        .unwrap();
    assert_eq!(session.token, "tok");
}
