//! CLI integration tests for sky-get-posts

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{any, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sky_get_posts() -> Command {
    let mut cmd = Command::cargo_bin("sky-get-posts").unwrap();
    cmd.env("SKYCAST_CONFIG", std::env::temp_dir().join("skycast-test-no-config.toml"))
        .env_remove("SKYCAST_BLUESKY_API")
        .env_remove("SKYCAST_DID")
        .env_remove("SKYCAST_ACCESS_TOKEN");
    cmd
}

fn entry(uri: &str, reply: Value, reason: Value) -> Value {
    json!({
        "post": {
            "uri": uri,
            "record": {
                "$type": "app.bsky.feed.post",
                "text": "Notes on the Analytical Engine",
                "createdAt": "2024-05-01T12:00:00.000Z",
                "reply": reply
            },
            "replyCount": 0,
            "repostCount": 5,
            "likeCount": 42,
            "author": {
                "handle": "ada.bsky.social",
                "displayName": "Ada Lovelace",
                "avatar": "https://cdn.example/ada.jpg"
            }
        },
        "reason": reason
    })
}

async fn feed_server() -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .and(query_param("actor", "did:plc:ada"))
        .and(query_param("limit", "3"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [
                entry("at://did:plc:ada/app.bsky.feed.post/1", Value::Null, Value::Null),
                entry("at://did:plc:ada/app.bsky.feed.post/2", json!({ "parent": { "uri": "at://x" } }), Value::Null),
                entry("at://did:plc:bob/app.bsky.feed.post/3", Value::Null, json!({ "by": { "handle": "ada.bsky.social" } }))
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    mock_server
}

#[test]
fn test_help_flag_output() {
    sky_get_posts()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--limit"))
        .stdout(predicate::str::contains("[default: 100]"))
        .stdout(predicate::str::contains("--format"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_flags_abort_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    sky_get_posts()
        .arg("--api")
        .arg(mock_server.uri())
        .args(["--did", "", "--access-token", "tok"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing DID"));

    sky_get_posts()
        .arg("--api")
        .arg(mock_server.uri())
        .args(["--did", "did:plc:ada"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing access token"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_prints_original_posts_as_yaml() {
    let mock_server = feed_server().await;

    let output = sky_get_posts()
        .arg("--api")
        .arg(mock_server.uri())
        .args(["--did", "did:plc:ada", "--access-token", "tok", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at://did:plc:ada/app.bsky.feed.post/1"))
        .stdout(predicate::str::contains("likeCount: 42"))
        .stdout(predicate::str::contains("authorDisplayName: Ada Lovelace"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(text.matches("- uri: ").count(), 1);
    assert!(!text.contains("app.bsky.feed.post/2"));
    assert!(!text.contains("did:plc:bob"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_json_format() {
    let mock_server = feed_server().await;

    let output = sky_get_posts()
        .arg("--api")
        .arg(mock_server.uri())
        .args(["--did", "did:plc:ada", "--access-token", "tok", "--limit", "3", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let posts: Value = serde_json::from_slice(&output).unwrap();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["uri"], "at://did:plc:ada/app.bsky.feed.post/1");
    assert_eq!(posts[0]["authorHandle"], "ada.bsky.social");
}
