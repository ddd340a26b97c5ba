//! HTTP adapter tests against a local mock server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use agentmart_cli::application::ports::{
    ApiError, AuthApi, CatalogApi, CredentialApi, GENERIC_API_FAILURE, TeamApi,
};
use agentmart_cli::domain::session::Session;
use agentmart_cli::infra::api::HttpMarketplaceApi;
use agentmart_common::{
    AuthRequest, CredentialRef, NewCredential, ProvisionKind, TeamCreateRequest, TeamPayload,
};
use indexmap::IndexMap;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in(server: &MockServer) -> HttpMarketplaceApi {
    let session = Session {
        token: "tok-123".to_string(),
        email: None,
    };
    HttpMarketplaceApi::new(&format!("{}/", server.uri()), Some(&session))
}

fn api_error(err: &anyhow::Error) -> &ApiError {
    err.downcast_ref::<ApiError>()
        .expect("error should be an ApiError")
}

#[tokio::test]
async fn requests_carry_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/credentials"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let creds = signed_in(&server).list_credentials().await.unwrap();
    assert!(creds.is_empty());
}

#[tokio::test]
async fn listings_accept_bare_and_wrapped_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"_id": "c1", "key": "AWS_KEY", "name": "Prod", "secret": "{}"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "name": "Scout", "requiredCredentials": {"AWS_KEY": "AWS"}}
        ])))
        .mount(&server)
        .await;

    let api = signed_in(&server);
    let creds = api.list_credentials().await.unwrap();
    assert_eq!(creds[0].id.as_deref(), Some("c1"));
    let agents = api.list_agents().await.unwrap();
    assert_eq!(agents[0].required_credentials["AWS_KEY"], "AWS");
}

#[tokio::test]
async fn prebuilt_teams_keyed_by_category_are_flattened() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "research": {"name": "Research Crew", "agents": [{"id": "a1", "name": "Scout"}]},
                "marketing": {"name": "Marketing Crew", "category": "mkt"}
            }
        })))
        .mount(&server)
        .await;

    let teams = signed_in(&server).prebuilt_teams().await.unwrap();
    let categories: Vec<_> = teams.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(categories, vec!["research", "mkt"]);
    assert_eq!(teams[0].agents[0].id, "a1");
}

#[tokio::test]
async fn error_status_uses_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credentials"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Credential already exists"})),
        )
        .mount(&server)
        .await;

    let err = signed_in(&server)
        .store_credential(&NewCredential {
            key: "AWS_KEY".to_string(),
            secret: "{}".to_string(),
            name: "Prod".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        api_error(&err),
        &ApiError::Rejected {
            status: 409,
            message: "Credential already exists".to_string()
        }
    );
}

#[tokio::test]
async fn store_accepts_partial_or_missing_echo() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/credentials"))
        .and(body_json(json!({"key": "AWS_KEY", "secret": "{}", "name": "Prod"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"_id": "c9"}})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let api = signed_in(&server);
    let body = NewCredential {
        key: "AWS_KEY".to_string(),
        secret: "{}".to_string(),
        name: "Prod".to_string(),
    };
    let partial = api.store_credential(&body).await.unwrap();
    assert_eq!(partial.id.as_deref(), Some("c9"));
    assert!(partial.key.is_empty() && partial.name.is_empty());

    let acknowledged = api.store_credential(&body).await.unwrap();
    assert_eq!(acknowledged.id, None);
    assert!(acknowledged.key.is_empty());
}

#[tokio::test]
async fn error_without_message_falls_back_to_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = signed_in(&server).list_teams().await.unwrap_err();
    assert_eq!(api_error(&err).to_string(), GENERIC_API_FAILURE);
}

#[tokio::test]
async fn success_false_body_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let err = signed_in(&server)
        .sign_in(&AuthRequest {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(api_error(&err).to_string(), "Invalid email or password");
}

#[tokio::test]
async fn unauthorized_is_recognisable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/credentials"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Unauthorized"})))
        .mount(&server)
        .await;
    let err = signed_in(&server).list_credentials().await.unwrap_err();
    assert!(api_error(&err).is_unauthorized());
}

#[tokio::test]
async fn wrong_shape_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agents": 3})))
        .mount(&server)
        .await;
    let err = signed_in(&server).list_agents().await.unwrap_err();
    assert!(matches!(api_error(&err), ApiError::Malformed { endpoint, .. } if endpoint == "/agents"));
}

#[tokio::test]
async fn unreachable_server_is_reported() {
    let api = HttpMarketplaceApi::new("http://127.0.0.1:9", None);
    let err = api.list_agents().await.unwrap_err();
    assert!(matches!(api_error(&err), ApiError::Unreachable { .. }));
}

#[tokio::test]
async fn delete_sends_key_and_name_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/credentials"))
        .and(body_json(json!({"key": "AWS_KEY", "name": "Prod"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    signed_in(&server)
        .delete_credential(&CredentialRef {
            key: "AWS_KEY".to_string(),
            name: "Prod".to_string(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn create_team_posts_to_recruit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/teams/recruit"))
        .and(body_json(json!({
            "name": "Ops",
            "provision": 1,
            "team": {
                "id": "team-1",
                "name": "Ops",
                "description": "Custom team with 1 agents",
                "image": "",
                "agentIds": ["a1"],
                "credentials": {}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"teamId": "t-9"}})))
        .expect(1)
        .mount(&server)
        .await;

    let created = signed_in(&server)
        .create_team(&TeamCreateRequest {
            name: "Ops".to_string(),
            provision: ProvisionKind::Custom,
            team: TeamPayload {
                id: "team-1".to_string(),
                name: "Ops".to_string(),
                description: "Custom team with 1 agents".to_string(),
                image: String::new(),
                agent_ids: vec!["a1".to_string()],
                credentials: IndexMap::new(),
            },
        })
        .await
        .unwrap();
    assert_eq!(created.dashboard_path(), "/dashboard/team/t-9");
}

#[tokio::test]
async fn sign_out_posts_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signout"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    signed_in(&server).sign_out().await.unwrap();
}
