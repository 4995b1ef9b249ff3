//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow through the public API: config → group
//! client → HTTP requests → typed records and pages

use async_trait::async_trait;
use clap::Parser;
use futures::StreamExt;
use groupkit::cli::{Cli, Runner};
use groupkit::{
    Account, ApiRequest, ApiResponse, ClientConfig, Error, GroupClient, RequestExecutor, Result,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GROUP_ID: u64 = 31;
const USER_ID: u64 = 900;

async fn mount_group(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/groups/{GROUP_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": GROUP_ID,
            "name": "Harbor Crew",
            "description": "",
            "owner": null,
            "shout": {
                "body": "Docks open",
                "poster": {"userId": 2, "username": "captain", "displayName": "Captain"},
                "created": "2024-05-01T00:00:00Z",
                "updated": "2024-05-01T00:00:00Z"
            },
            "memberCount": 40,
            "publicEntryAllowed": false,
            "hasVerifiedBadge": false
        })))
        .mount(server)
        .await;
}

async fn mount_ladder(server: &MockServer, current_role: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/groups/{GROUP_ID}/roles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groupId": GROUP_ID,
            "roles": [
                {"id": 13, "name": "Captain", "rank": 255, "memberCount": 1},
                {"id": 11, "name": "Deckhand", "rank": 1, "memberCount": 30},
                {"id": 12, "name": "Bosun", "rank": 50, "memberCount": 9}
            ]
        })))
        .mount(server)
        .await;

    let role = match current_role {
        11 => json!({"id": 11, "name": "Deckhand", "rank": 1}),
        12 => json!({"id": 12, "name": "Bosun", "rank": 50}),
        _ => json!({"id": 13, "name": "Captain", "rank": 255}),
    };
    Mock::given(method("GET"))
        .and(path(format!("/v1/users/{USER_ID}/groups/roles")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"group": {"id": GROUP_ID, "name": "Harbor Crew"}, "role": role}]
        })))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_groups_api_url(server.uri())
}

// ============================================================================
// Config → Client
// ============================================================================

#[tokio::test]
async fn test_connect_from_yaml_config() {
    let server = MockServer::start().await;
    mount_group(&server).await;

    let yaml = format!(
        "groups_api_url: \"{}\"\ntimeout_secs: 5\nuser_agent: \"harbor-bot/1.0\"\n",
        server.uri()
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = ClientConfig::load(file.path()).unwrap();
    let client = GroupClient::connect(GROUP_ID, Account::anonymous(), config)
        .await
        .unwrap();

    assert_eq!(client.group().name, "Harbor Crew");
    assert_eq!(client.get_shout().unwrap().body, "Docks open");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].headers.get("user-agent").unwrap().to_str().unwrap(),
        "harbor-bot/1.0"
    );
}

// ============================================================================
// Rank Navigation
// ============================================================================

#[tokio::test]
async fn test_promote_then_blocked_by_sentinel() {
    let server = MockServer::start().await;
    mount_group(&server).await;
    mount_ladder(&server, 12).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/v1/groups/{GROUP_ID}/users/{USER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = GroupClient::connect(GROUP_ID, Account::new("secret"), config_for(&server))
        .await
        .unwrap();

    let result = client.promote(USER_ID).await;
    assert!(matches!(result, Err(Error::RankNotFound { index: 2 })));
}

#[tokio::test]
async fn test_demote_assigns_lower_role() {
    let server = MockServer::start().await;
    mount_group(&server).await;
    mount_ladder(&server, 12).await;

    Mock::given(method("PATCH"))
        .and(path(format!("/v1/groups/{GROUP_ID}/users/{USER_ID}")))
        .and(header("Cookie", ".ROBLOSECURITY=secret"))
        .and(body_json(json!({"roleId": 11})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GroupClient::connect(GROUP_ID, Account::new("secret"), config_for(&server))
        .await
        .unwrap();

    let change = client.demote(USER_ID).await.unwrap();
    assert_eq!(change.from.name, "Bosun");
    assert_eq!(change.to.name, "Deckhand");
}

#[tokio::test]
async fn test_rank_change_without_cookie_sends_nothing() {
    let server = MockServer::start().await;
    mount_group(&server).await;

    let client = GroupClient::connect(GROUP_ID, Account::anonymous(), config_for(&server))
        .await
        .unwrap();

    assert!(matches!(
        client.change_rank(USER_ID, 1).await,
        Err(Error::RequiresCredentials)
    ));
    assert!(matches!(
        client.exile_member(USER_ID).await,
        Err(Error::RequiresCredentials)
    ));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ============================================================================
// Streams
// ============================================================================

#[tokio::test]
async fn test_wall_posts_as_futures_stream() {
    let server = MockServer::start().await;
    mount_group(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/groups/{GROUP_ID}/wall/posts")))
        .and(query_param("cursor", "next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": null,
            "data": [{"id": 3, "poster": null, "body": "third", "created": "2024-05-03T00:00:00Z"}]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/groups/{GROUP_ID}/wall/posts")))
        .and(query_param("sortOrder", "Asc"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": "next",
            "data": [
                {"id": 1, "poster": null, "body": "first", "created": "2024-05-01T00:00:00Z"},
                {"id": 2, "poster": null, "body": "second", "created": "2024-05-02T00:00:00Z"}
            ]
        })))
        .with_priority(5)
        .mount(&server)
        .await;

    let config = ClientConfig::from_yaml_str(&format!(
        "groups_api_url: \"{}\"\nwall:\n  page_size: 2\n  sort_order: Asc\n",
        server.uri()
    ))
    .unwrap();
    let client = GroupClient::connect(GROUP_ID, Account::anonymous(), config)
        .await
        .unwrap();

    let stream = client.fetch_group_posts(None).unwrap();
    let pages: Vec<_> = stream.collect().await;

    assert_eq!(pages.len(), 2);
    let bodies: Vec<String> = pages
        .into_iter()
        .flatten()
        .map(|post| post.body)
        .collect();
    assert_eq!(bodies, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_join_requests_error_after_partial_results() {
    let server = MockServer::start().await;
    mount_group(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/groups/{GROUP_ID}/join-requests")))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"code": 0, "message": "Forbidden", "userFacingMessage": "Session expired"}]
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/groups/{GROUP_ID}/join-requests")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nextPageCursor": "c2",
            "data": [{"requester": {"userId": 7, "username": "sailor", "displayName": "Sailor"},
                      "created": "2024-05-04T00:00:00Z"}]
        })))
        .with_priority(5)
        .mount(&server)
        .await;

    let client = GroupClient::connect(GROUP_ID, Account::new("secret"), config_for(&server))
        .await
        .unwrap();

    let (items, error) = client
        .fetch_join_requests(None)
        .unwrap()
        .collect_items()
        .await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].requester.username, "sailor");
    assert_eq!(items[0].group.name, "Harbor Crew");
    match error {
        Some(Error::Unauthorized { message }) => assert_eq!(message, "Session expired"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

// ============================================================================
// Custom Executor
// ============================================================================

/// Executor serving canned responses keyed by URL path
struct CannedExecutor {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl RequestExecutor for CannedExecutor {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = url::Url::parse(&request.url)?;
        self.seen.lock().unwrap().push(url.path().to_string());

        let body: Value = match url.path() {
            "/v1/groups/31" => json!({
                "id": GROUP_ID, "name": "Harbor Crew", "memberCount": 40,
                "publicEntryAllowed": true, "shout": null
            }),
            "/v1/groups/31/roles" => json!({"roles": [
                {"id": 12, "name": "Bosun", "rank": 50},
                {"id": 11, "name": "Deckhand", "rank": 1}
            ]}),
            _ => return Ok(ApiResponse::new(404, "")),
        };
        Ok(ApiResponse::new(200, serde_json::to_vec(&body)?))
    }
}

#[tokio::test]
async fn test_group_client_over_custom_executor() {
    let executor = Arc::new(CannedExecutor {
        seen: Mutex::new(Vec::new()),
    });

    let client = GroupClient::fetch(
        GROUP_ID,
        executor.clone(),
        Arc::new(Account::anonymous()),
        ClientConfig::default(),
    )
    .await
    .unwrap();

    let roles = client.get_group_roles().await.unwrap();
    let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Deckhand", "Bosun"]);
    assert!(matches!(client.get_shout(), Err(Error::ShoutUnavailable)));

    assert_eq!(
        *executor.seen.lock().unwrap(),
        vec!["/v1/groups/31".to_string(), "/v1/groups/31/roles".to_string()]
    );
}

// ============================================================================
// CLI Runner
// ============================================================================

#[tokio::test]
async fn test_runner_lists_roles() {
    let server = MockServer::start().await;
    mount_group(&server).await;
    mount_ladder(&server, 11).await;

    let uri = server.uri();
    let cli = Cli::parse_from([
        "groupkit",
        "--api-url",
        uri.as_str(),
        "-g",
        "31",
        "roles",
    ]);

    Runner::new(cli).run().await.unwrap();
}

#[tokio::test]
async fn test_runner_requires_group() {
    let cli = Cli::try_parse_from(["groupkit", "roles"]).unwrap();
    if cli.group.is_some() {
        // GROUPKIT_GROUP is set in the environment
        return;
    }

    let result = Runner::new(cli).run().await;
    assert!(matches!(result, Err(Error::Config { .. })));
}
