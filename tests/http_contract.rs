//! End-to-end checks of the guestbook HTTP contract over a real socket.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;

use guestbook_api::api;
use guestbook_api::app_state::AppState;
use guestbook_api::store::{MemoryStore, SystemClock};
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

/// Serves a fresh app on an ephemeral port and returns its guestbook URL.
async fn spawn(store: MemoryStore) -> String {
    let app = api::build_app(AppState::new(Arc::new(store)));
    let Ok(listener) = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await
    else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api/guestbook")
}

async fn post(client: &reqwest::Client, url: &str, body: Value) -> (StatusCode, Value) {
    let Ok(response) = client.post(url).json(&body).send().await else {
        panic!("request failed");
    };
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn list(client: &reqwest::Client, url: &str) -> Vec<Value> {
    let Ok(response) = client.get(url).send().await else {
        panic!("request failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    let Ok(Value::Array(entries)) = response.json::<Value>().await else {
        panic!("expected array");
    };
    entries
}

#[tokio::test]
async fn demo_deployment_serves_seeded_entries() {
    let url = spawn(MemoryStore::with_demo_entries(100, Arc::new(SystemClock))).await;
    let client = reqwest::Client::new();
    let entries = list(&client, &url).await;
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries.first().and_then(|e| e.get("name")),
        Some(&json!("xXx_Gamer_xXx"))
    );
}

#[tokio::test]
async fn sign_and_read_back() {
    let url = spawn(MemoryStore::with_demo_entries(100, Arc::new(SystemClock))).await;
    let client = reqwest::Client::new();

    let (status, created) = post(
        &client,
        &url,
        json!({"name": "<b>Tony</b>", "message": "rad <3"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.get("id"), Some(&json!(4)));
    assert_eq!(created.get("name"), Some(&json!("bTony/b")));
    assert_eq!(created.get("message"), Some(&json!("rad 3")));

    let entries = list(&client, &url).await;
    assert_eq!(entries.len(), 4);
    assert_eq!(entries.first(), Some(&created));
}

#[tokio::test]
async fn rejected_post_changes_nothing() {
    let url = spawn(MemoryStore::new(100)).await;
    let client = reqwest::Client::new();

    for body in [
        json!({"name": "", "message": "hi"}),
        json!({"name": "bob"}),
        json!({"name": null, "message": "hi"}),
    ] {
        let (status, error) = post(&client, &url, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({"error": "Name and message are required"}));
    }
    assert!(list(&client, &url).await.is_empty());
}

#[tokio::test]
async fn store_keeps_the_newest_hundred() {
    let url = spawn(MemoryStore::new(100)).await;
    let client = reqwest::Client::new();

    for i in 0..105 {
        let (status, _) = post(
            &client,
            &url,
            json!({"name": format!("visitor{i}"), "message": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let entries = list(&client, &url).await;
    assert_eq!(entries.len(), 100);
    let ids: Vec<i64> = entries
        .iter()
        .filter_map(|e| e.get("id").and_then(Value::as_i64))
        .collect();
    assert_eq!(ids.first(), Some(&105));
    assert_eq!(ids.last(), Some(&6));
}

#[tokio::test]
async fn preflight_and_unsupported_methods() {
    let url = spawn(MemoryStore::new(100)).await;
    let client = reqwest::Client::new();

    let Ok(preflight) = client.request(Method::OPTIONS, &url).send().await else {
        panic!("request failed");
    };
    assert_eq!(preflight.status(), StatusCode::OK);
    assert_eq!(
        preflight
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(preflight.text().await.ok().as_deref(), Some(""));

    let Ok(deleted) = client.delete(&url).send().await else {
        panic!("request failed");
    };
    assert_eq!(deleted.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        deleted.headers().get("allow").and_then(|v| v.to_str().ok()),
        Some("GET, POST")
    );
    assert_eq!(
        deleted.json::<Value>().await.ok(),
        Some(json!({"error": "Method DELETE not allowed"}))
    );
}
