//! UI, static assets and service endpoints.

mod common;

use common::{static_root, unreachable_upstream, TestApp};

#[tokio::test]
async fn root_serves_the_index_file() {
    let app = TestApp::spawn(&unreachable_upstream()).await;

    let response = app.client.get(app.url("/")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let expected = std::fs::read_to_string(static_root().join("index.html")).unwrap();
    assert_eq!(response.text().await.unwrap(), expected);
}

#[tokio::test]
async fn other_assets_come_from_the_static_root() {
    let app = TestApp::spawn(&unreachable_upstream()).await;

    let response = app.client.get(app.url("/styles.css")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let expected = std::fs::read_to_string(static_root().join("styles.css")).unwrap();
    assert_eq!(response.text().await.unwrap(), expected);
}

#[tokio::test]
async fn unknown_assets_are_not_found() {
    let app = TestApp::spawn(&unreachable_upstream()).await;

    let response = app
        .client
        .get(app.url("/does-not-exist.js"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::spawn(&unreachable_upstream()).await;

    let response = app.client.get(app.url("/health")).send().await.unwrap();

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fal-relay");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::spawn(&unreachable_upstream()).await;

    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}
