//! End-to-end flows: the real binary against a mock marketplace.
//!
//! Every test points `AGENTMART_API_URL` at a local mock server and keeps
//! config and session files in a temp dir.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Env {
    dir: TempDir,
    server: MockServer,
}

impl Env {
    async fn start() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            server: MockServer::start().await,
        }
    }

    /// Start with a stored session for `ada@example.com`.
    async fn signed_in() -> Self {
        let env = Self::start().await;
        std::fs::write(
            env.session_path(),
            r#"{"token":"tok-123","email":"ada@example.com"}"#,
        )
        .unwrap();
        env
    }

    fn session_path(&self) -> std::path::PathBuf {
        self.dir.path().join("session.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("agentmart"));
        cmd.env("NO_COLOR", "1")
            .env("AGENTMART_CONFIG", self.dir.path().join("config.yaml"))
            .env("AGENTMART_SESSION", self.session_path())
            .env("AGENTMART_API_URL", self.server.uri())
            .env_remove("AGENTMART_PASSWORD");
        cmd
    }

    async fn mount_catalog(&self) {
        Mock::given(method("GET"))
            .and(path("/agents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {
                    "id": "writer", "name": "Writer", "category": "Content",
                    "description": "Drafts blog posts",
                    "requiredCredentials": {"OPENAI_KEY": "Model access"}
                },
                {
                    "id": "deployer", "name": "Deployer", "category": "DevOps",
                    "requiredCredentials": {"AWS_KEY": "AWS access"}
                }
            ]})))
            .mount(&self.server)
            .await;
    }

    async fn mount_credentials(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/credentials"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

// --- Browsing ---

#[tokio::test(flavor = "multi_thread")]
async fn agents_list_shows_catalog() {
    let env = Env::start().await;
    env.mount_catalog().await;
    env.cmd()
        .args(["agents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("writer"))
        .stdout(predicate::str::contains("deployer"));
}

#[tokio::test(flavor = "multi_thread")]
async fn agents_list_filters_by_category_in_json() {
    let env = Env::start().await;
    env.mount_catalog().await;
    let out = env
        .cmd()
        .args(["agents", "list", "--category", "devops", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let ids: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["deployer"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn agents_show_lists_required_credentials() {
    let env = Env::start().await;
    env.mount_catalog().await;
    let out = env
        .cmd()
        .args(["agents", "show", "deployer", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["requiredCredentials"]["AWS_KEY"], "AWS access");
}

#[tokio::test(flavor = "multi_thread")]
async fn explore_lists_prebuilt_teams() {
    let env = Env::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "marketing": {"name": "Marketing Crew", "agents": [{"id": "writer", "name": "Writer"}]}
        })))
        .mount(&env.server)
        .await;
    env.cmd()
        .arg("explore")
        .assert()
        .success()
        .stdout(predicate::str::contains("marketing"))
        .stdout(predicate::str::contains("Marketing Crew"));
}

// --- Credentials ---

#[tokio::test(flavor = "multi_thread")]
async fn credentials_list_masks_secrets() {
    let env = Env::signed_in().await;
    env.mount_credentials(json!([
        {"key": "AWS_KEY", "name": "Prod AWS", "secret": "{\"default\":\"secret123\"}"}
    ]))
    .await;
    env.cmd()
        .args(["credentials", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prod AWS"))
        .stdout(predicate::str::contains("secret123").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn credentials_add_sends_encoded_secret() {
    let env = Env::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/credentials"))
        .and(body_json(json!({
            "key": "AWS_KEY",
            "secret": "{\"default\":\"secret123\"}",
            "name": "Prod AWS"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {
            "_id": "c1", "key": "AWS_KEY", "name": "Prod AWS", "secret": "{\"default\":\"secret123\"}"
        }})))
        .expect(1)
        .mount(&env.server)
        .await;

    env.cmd()
        .args([
            "credentials",
            "add",
            "--key",
            "AWS_KEY",
            "--name",
            "Prod AWS",
            "--field",
            "default=secret123",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prod AWS"));
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_credential_is_not_sent() {
    let env = Env::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/credentials"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.server)
        .await;

    env.cmd()
        .args(["credentials", "add", "--key", "aws key", "--field", "default=x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Credential validation failed"))
        .stderr(predicate::str::contains("Name is required"));
}

#[tokio::test(flavor = "multi_thread")]
async fn credentials_delete_with_yes_skips_prompt() {
    let env = Env::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/credentials"))
        .and(body_json(json!({"key": "AWS_KEY", "name": "Prod AWS"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&env.server)
        .await;

    env.cmd()
        .args(["credentials", "delete", "AWS_KEY", "Prod AWS", "--yes"])
        .assert()
        .success();
}

// --- Teams ---

#[tokio::test(flavor = "multi_thread")]
async fn team_creation_refuses_missing_credentials() {
    let env = Env::signed_in().await;
    env.mount_catalog().await;
    env.mount_credentials(json!([])).await;
    Mock::given(method("POST"))
        .and(path("/teams/recruit"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&env.server)
        .await;

    env.cmd()
        .args(["teams", "create", "--name", "Ops", "--agent", "deployer"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing credentials: AWS_KEY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn team_creation_with_stored_credential_prints_dashboard() {
    let env = Env::signed_in().await;
    env.mount_catalog().await;
    env.mount_credentials(json!({"data": [
        {"_id": "c1", "key": "AWS_KEY", "name": "Prod AWS", "secret": "{\"default\":\"s\"}"}
    ]}))
    .await;
    Mock::given(method("POST"))
        .and(path("/teams/recruit"))
        .and(body_partial_json(json!({
            "name": "Ops",
            "provision": 1,
            "team": {
                "name": "Ops",
                "description": "Custom team with 1 agents",
                "agentIds": ["deployer"],
                "credentials": {"AWS_KEY": {"name": "Prod AWS"}}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"teamId": "t-9"}})))
        .expect(1)
        .mount(&env.server)
        .await;

    env.cmd()
        .args([
            "teams",
            "create",
            "--name",
            "Ops",
            "--agent",
            "deployer",
            "--use",
            "AWS_KEY=Prod AWS",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("/dashboard/team/t-9"));
}

#[tokio::test(flavor = "multi_thread")]
async fn server_rejection_message_reaches_the_user() {
    let env = Env::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Plan limit reached"})))
        .mount(&env.server)
        .await;
    env.cmd()
        .args(["teams", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Plan limit reached"));
}

// --- Session lifecycle ---

#[tokio::test(flavor = "multi_thread")]
async fn login_then_whoami_then_logout() {
    let env = Env::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .and(body_json(json!({"email": "ada@example.com", "password": "hunter2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "tok-new"}})))
        .expect(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .and(header("authorization", "Bearer tok-new"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&env.server)
        .await;

    env.cmd()
        .args(["auth", "login", "--email", "ada@example.com"])
        .env("AGENTMART_PASSWORD", "hunter2")
        .assert()
        .success();
    let stored = std::fs::read_to_string(env.session_path()).unwrap();
    assert!(stored.contains("tok-new"));

    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as ada@example.com"));

    env.cmd().args(["auth", "logout"]).assert().success();
    env.cmd()
        .args(["auth", "whoami"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not signed in"));
}
