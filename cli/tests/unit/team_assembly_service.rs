//! Unit tests for the team assembly flow against the fake marketplace.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentmart_cli::application::ports::ApiError;
use agentmart_cli::application::services::team_assembly::{self, TeamAssembly};
use agentmart_cli::domain::credential::CredentialDraft;
use agentmart_cli::domain::error::{AgentError, CredentialError};
use agentmart_cli::domain::team::Provision;
use agentmart_common::ProvisionKind;
use chrono::{TimeZone, Utc};

use crate::mocks::{FakeMarketplace, RecordingReporter, agent, agent_with_schema, credential};

fn now() -> chrono::DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

#[tokio::test]
async fn new_credential_unblocks_team_creation() {
    let api = FakeMarketplace::with_agents(vec![agent("deployer", &[("AWS_KEY", "AWS access")])]);
    let reporter = RecordingReporter::default();
    let mut assembly = TeamAssembly::load(&api, &reporter, api.agents.clone())
        .await
        .unwrap();
    assert_eq!(assembly.missing_keys(), vec!["AWS_KEY"]);
    assert!(!assembly.can_submit());
    assert!(assembly.candidates("AWS_KEY").is_empty());

    let mut draft = assembly.draft_for("AWS_KEY");
    assert_eq!(draft.key, "AWS_KEY");
    draft.name = "Prod AWS".to_string();
    draft.secret.upsert("default", "secret123").unwrap();

    let created = assembly
        .fulfil_with_new_credential(&api, &reporter, "AWS_KEY", &draft)
        .await
        .unwrap();
    assert_eq!(created.name, "Prod AWS");
    assert_eq!(
        assembly.selection().get("AWS_KEY").map(|c| c.name.as_str()),
        Some("Prod AWS")
    );
    assert!(assembly.missing_keys().is_empty());
    assert!(assembly.can_submit());

    let recorded = api.recorded();
    let stored = &recorded.stored;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].key, "AWS_KEY");
    assert_eq!(stored[0].secret, r#"{"default":"secret123"}"#);
}

#[tokio::test]
async fn submit_sends_custom_team_with_selected_credentials() {
    let api = FakeMarketplace::with_agents(vec![
        agent("writer", &[("OPENAI_KEY", "model access")]),
        agent("deployer", &[("AWS_KEY", "AWS access")]),
    ])
    .with_credentials(vec![
        credential("AWS_KEY", "Prod AWS", r#"{"id":"a"}"#),
        credential("OPENAI_KEY", "Main", r#"{"default":"sk"}"#),
    ]);
    let reporter = RecordingReporter::default();
    let mut assembly = TeamAssembly::load(&api, &reporter, api.agents.clone())
        .await
        .unwrap();
    assembly.select_stored("AWS_KEY", "Prod AWS").unwrap();
    assembly.select_stored("OPENAI_KEY", "Main").unwrap();

    let created = assembly
        .submit(&api, &reporter, " Ops ", "", &Provision::Custom, now())
        .await
        .unwrap();
    assert_eq!(created.dashboard_path(), "/dashboard/team/t-1");

    let recorded = api.recorded();
    let teams = &recorded.teams;
    assert_eq!(teams.len(), 1);
    let request = &teams[0];
    assert_eq!(request.name, "Ops");
    assert_eq!(request.provision, ProvisionKind::Custom);
    assert_eq!(request.team.id, "team-1700000000000");
    assert_eq!(request.team.agent_ids, vec!["writer", "deployer"]);
    assert_eq!(request.team.description, "Custom team with 2 agents");
    let keys: Vec<_> = request.team.credentials.keys().cloned().collect();
    assert_eq!(keys, vec!["AWS_KEY", "OPENAI_KEY"]);
}

#[tokio::test]
async fn recruit_uses_category_as_team_id() {
    let api = FakeMarketplace::with_agents(vec![agent("scout", &[])]);
    let reporter = RecordingReporter::default();
    let assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    assert!(assembly.can_submit());
    let provision = Provision::Prebuilt {
        category: "research".to_string(),
        image: Some("crew.png".to_string()),
    };
    assembly
        .submit(&api, &reporter, "Research Crew", "Finds things", &provision, now())
        .await
        .unwrap();
    let recorded = api.recorded();
    let request = &recorded.teams[0];
    assert_eq!(request.provision, ProvisionKind::Prebuilt);
    assert_eq!(request.team.id, "research");
    assert_eq!(request.team.image, "crew.png");
    assert_eq!(request.team.description, "Finds things");
}

#[tokio::test]
async fn submit_refuses_while_credentials_are_missing() {
    let api = FakeMarketplace::with_agents(vec![agent(
        "deployer",
        &[("AWS_KEY", "AWS access"), ("SLACK_TOKEN", "Slack")],
    )]);
    let reporter = RecordingReporter::default();
    let assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    let err = assembly
        .submit(&api, &reporter, "Ops", "", &Provision::Custom, now())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CredentialError>(),
        Some(CredentialError::Missing(keys)) if keys == "AWS_KEY, SLACK_TOKEN"
    ));
    assert!(api.recorded().teams.is_empty());
}

#[tokio::test]
async fn submit_requires_a_team_name() {
    let api = FakeMarketplace::with_agents(vec![agent("scout", &[])]);
    let assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    let err = assembly
        .submit(&api, &RecordingReporter::default(), "  ", "", &Provision::Custom, now())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AgentError>(),
        Some(AgentError::MissingTeamName)
    ));
}

#[tokio::test]
async fn rejected_submission_surfaces_server_message_once() {
    let api = FakeMarketplace::with_agents(vec![agent("scout", &[])]).rejecting("Team limit reached");
    let assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    let err = assembly
        .submit(
            &api,
            &RecordingReporter::default(),
            "Ops",
            "",
            &Provision::Custom,
            now(),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<ApiError>().map(ToString::to_string),
        Some("Team limit reached".to_string())
    );
    assert_eq!(api.recorded().teams.len(), 1, "no retry");
}

#[tokio::test]
async fn failed_credential_creation_leaves_selection_untouched() {
    let api = FakeMarketplace::with_agents(vec![agent("deployer", &[("AWS_KEY", "AWS")])])
        .rejecting("Duplicate credential name");
    let reporter = RecordingReporter::default();
    let mut assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    let mut draft = assembly.draft_for("AWS_KEY");
    draft.name = "Prod AWS".to_string();
    draft.secret.upsert("default", "x").unwrap();

    let err = assembly
        .fulfil_with_new_credential(&api, &reporter, "AWS_KEY", &draft)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("Duplicate credential name"));
    assert_eq!(assembly.missing_keys(), vec!["AWS_KEY"]);
    assert!(assembly.candidates("AWS_KEY").is_empty());
}

#[tokio::test]
async fn new_credential_under_another_key_is_refused() {
    let api = FakeMarketplace::with_agents(vec![agent("writer", &[("openai_key", "Model access")])]);
    let reporter = RecordingReporter::default();
    let mut assembly = TeamAssembly::new(api.agents.clone(), Vec::new()).unwrap();
    let mut draft = assembly.draft_for("openai_key");
    draft.key = "OPENAI_KEY".to_string();
    draft.name = "Main".to_string();
    draft.secret.upsert("default", "sk-1").unwrap();

    let err = assembly
        .fulfil_with_new_credential(&api, &reporter, "openai_key", &draft)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CredentialError>(),
        Some(CredentialError::KeyMismatch { expected, got })
            if expected == "openai_key" && got == "OPENAI_KEY"
    ));
    assert!(api.recorded().stored.is_empty());
    assert!(assembly.selection().get("OPENAI_KEY").is_none());
    assert_eq!(assembly.missing_keys(), vec!["openai_key"]);
}

#[test]
fn select_stored_rejects_unknown_key_and_name() {
    let agents = vec![agent("deployer", &[("AWS_KEY", "AWS")])];
    let stored = vec![credential("AWS_KEY", "Prod AWS", "{}")];
    let mut assembly = TeamAssembly::new(agents, stored).unwrap();

    let err = assembly.select_stored("SLACK_TOKEN", "Main").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CredentialError>(),
        Some(CredentialError::NotRequired(_))
    ));
    let err = assembly.select_stored("AWS_KEY", "Staging").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CredentialError>(),
        Some(CredentialError::NotFound { .. })
    ));
    assert!(!assembly.can_submit());
}

#[test]
fn later_selection_replaces_earlier_one() {
    let agents = vec![agent("deployer", &[("AWS_KEY", "AWS")])];
    let stored = vec![
        credential("AWS_KEY", "Prod AWS", "{}"),
        credential("AWS_KEY", "Staging AWS", "{}"),
    ];
    let mut assembly = TeamAssembly::new(agents, stored).unwrap();
    assert_eq!(assembly.candidates("AWS_KEY").len(), 2);
    assembly.select_stored("AWS_KEY", "Prod AWS").unwrap();
    assembly.select_stored("AWS_KEY", "Staging AWS").unwrap();
    assert_eq!(assembly.selection().selected().len(), 1);
    assert_eq!(assembly.selection().get("AWS_KEY").unwrap().name, "Staging AWS");
}

#[test]
fn draft_for_seeds_declared_schema() {
    let agents = vec![agent_with_schema("deployer", "AWS_KEY", &["access_key_id", "secret"])];
    let assembly = TeamAssembly::new(agents, Vec::new()).unwrap();
    let draft: CredentialDraft = assembly.draft_for("AWS_KEY");
    let keys: Vec<_> = draft.secret.fields().iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["access_key_id", "secret"]);
    assert!(draft.secret.is_schema_locked());
}

#[test]
fn empty_agent_list_is_refused() {
    let err = TeamAssembly::new(Vec::new(), Vec::new()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AgentError>(),
        Some(AgentError::NoAgentsSelected)
    ));
}

#[tokio::test]
async fn list_teams_returns_server_teams() {
    let api = FakeMarketplace::default();
    let teams = team_assembly::list_teams(&api, &RecordingReporter::default())
        .await
        .unwrap();
    assert!(teams.is_empty());
}
