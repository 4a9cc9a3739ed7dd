mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use linkcut::application::services::TokenService;
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_success() {
    let (server, _store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    let response = server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": "https://Example.com:443/page#top" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 12);
    assert_eq!(json["originalUrl"], "https://example.com/page");
    assert_eq!(json["clicks"], 0);
    assert_eq!(json["ownerId"], 1);
    assert_eq!(
        json["shortUrl"],
        format!("{}/t/{}", common::TEST_BASE_URL, code)
    );
    assert!(json.get("createdAt").is_some());
}

#[tokio::test]
async fn test_create_link_accepts_from_field() {
    let (server, _store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    let response = server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "from": "http://example.com/a" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["originalUrl"], "http://example.com/a");
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (server, store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    for url in ["", "not a url", "ftp://example.com/file", "javascript:alert(1)"] {
        let response = server
            .post("/api/link")
            .add_header("Authorization", common::bearer(&token))
            .json(&json!({ "originalUrl": url }))
            .await;

        response.assert_status_bad_request();

        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert!(json["error"]["details"].get("originalUrl").is_some());
    }

    assert_eq!(store.link_count(), 0);
}

#[tokio::test]
async fn test_same_url_twice_gives_two_links() {
    let (server, _store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    let mut codes = Vec::new();
    for _ in 0..2 {
        let response = server
            .post("/api/link")
            .add_header("Authorization", common::bearer(&token))
            .json(&json!({ "originalUrl": "https://example.com" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        codes.push(response.json::<Value>()["code"].as_str().unwrap().to_string());
    }

    assert_ne!(codes[0], codes[1]);
}

#[tokio::test]
async fn test_list_links_only_own_newest_first() {
    let (server, _store) = common::make_server();
    let alice = common::signed_in(&server, "alice@example.com").await;
    let bob = common::signed_in(&server, "bob@example.com").await;

    for url in ["https://example.com/1", "https://example.com/2"] {
        server
            .post("/api/link")
            .add_header("Authorization", common::bearer(&alice))
            .json(&json!({ "originalUrl": url }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&bob))
        .json(&json!({ "originalUrl": "https://bob.example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/link")
        .add_header("Authorization", common::bearer(&alice))
        .await;

    response.assert_status_ok();

    let links = response.json::<Vec<Value>>();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|l| l["ownerId"] == 1));
    assert_eq!(links[0]["originalUrl"], "https://example.com/2");
    assert_eq!(links[1]["originalUrl"], "https://example.com/1");
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    let response = server
        .get("/api/link")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_get_link_by_id() {
    let (server, _store) = common::make_server();
    let alice = common::signed_in(&server, "alice@example.com").await;
    let bob = common::signed_in(&server, "bob@example.com").await;

    let created = server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&alice))
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .json::<Value>();
    let path = format!("/api/link/{}", created["id"]);

    let response = server
        .get(&path)
        .add_header("Authorization", common::bearer(&alice))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["code"], created["code"]);

    server
        .get(&path)
        .add_header("Authorization", common::bearer(&bob))
        .await
        .assert_status_not_found();

    server
        .get("/api/link/999")
        .add_header("Authorization", common::bearer(&alice))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_link_routes_require_token() {
    let (server, _store) = common::make_server();

    server
        .post("/api/link")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await
        .assert_status_unauthorized();

    server
        .get("/api/link")
        .add_header("Authorization", "Bearer not-a-token")
        .await
        .assert_status_unauthorized();

    server
        .get("/api/link")
        .add_header("Authorization", "Basic dXNlcjpwYXNz")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (server, _store) = common::make_server();
    let user_id = common::register(&server, "user@example.com", "secret123").await;

    let tokens = TokenService::new(common::TEST_SECRET);
    let stale = tokens
        .issue_at(user_id, Utc::now() - Duration::minutes(61))
        .unwrap();
    let fresh = tokens
        .issue_at(user_id, Utc::now() - Duration::minutes(59))
        .unwrap();

    server
        .get("/api/link")
        .add_header("Authorization", common::bearer(&stale))
        .await
        .assert_status_unauthorized();

    server
        .get("/api/link")
        .add_header("Authorization", common::bearer(&fresh))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_token_for_unknown_owner_cannot_create() {
    let (server, _store) = common::make_server();

    let token = TokenService::new(common::TEST_SECRET).issue(42).unwrap();

    let response = server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_create_link_mistyped_body_is_validation_error() {
    let (server, store) = common::make_server();
    let token = common::signed_in(&server, "user@example.com").await;

    let response = server
        .post("/api/link")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "originalUrl": 5 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    assert_eq!(store.link_count(), 0);
}
