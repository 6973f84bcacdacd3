//! Integration tests for the identity boundary: reservation and recipient lookup.

use std::net::SocketAddr;

use serde_json::json;
use tokio::net::TcpListener;

use relaypad_server::{config::Config, db, routes, state::AppState};

/// Start the server on a random port backed by a temp database.
async fn start_test_server() -> String {
    let tmp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = tmp_dir.path().join("relaypad-db");

    let config = Config {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        db_path: db_path.to_str().unwrap().to_string(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
    };
    let db = db::init_database(&config.db_path);
    let state = AppState::new(db, config);

    let app = routes::build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
        let _keep = tmp_dir;
    });

    format!("http://{}", addr)
}

async fn check_username(base_url: &str, username: &str) -> (u16, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/check-username", base_url))
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("check-username request failed");
    let status = resp.status().as_u16();
    let body = resp.json().await.expect("check-username body not JSON");
    (status, body)
}

async fn check_recipient(base_url: &str, username: &str) -> serde_json::Value {
    let resp = reqwest::Client::new()
        .post(format!("{}/api/check-recipient", base_url))
        .json(&json!({ "username": username }))
        .send()
        .await
        .expect("check-recipient request failed");
    assert_eq!(resp.status().as_u16(), 200);
    resp.json().await.expect("check-recipient body not JSON")
}

#[tokio::test]
async fn test_check_username_reserves_on_first_claim() {
    let base_url = start_test_server().await;

    let (status, body) = check_username(&base_url, "alice").await;
    assert_eq!(status, 200);
    assert_eq!(body["username"], "alice");

    // The first claim reserved the name durably.
    let (status, body) = check_username(&base_url, "alice").await;
    assert_eq!(status, 409);
    assert_eq!(body["message"], "Username taken");
    assert_eq!(body["suggestion"], "alice1");
}

#[tokio::test]
async fn test_suggestion_skips_taken_suffixes() {
    let base_url = start_test_server().await;

    // "alice" and "alice1" both exist; the next free suffix is "alice2".
    let (status, _) = check_username(&base_url, "alice").await;
    assert_eq!(status, 200);
    let (status, _) = check_username(&base_url, "alice1").await;
    assert_eq!(status, 200);

    let (status, body) = check_username(&base_url, "alice").await;
    assert_eq!(status, 409);
    assert_eq!(body["suggestion"], "alice2");
}

#[tokio::test]
async fn test_check_recipient_reports_existence_without_reserving() {
    let base_url = start_test_server().await;

    let (status, _) = check_username(&base_url, "dave").await;
    assert_eq!(status, 200);

    let body = check_recipient(&base_url, "dave").await;
    assert_eq!(body["exists"], true);

    // Asking about an unknown name does not claim it.
    let body = check_recipient(&base_url, "mallory").await;
    assert_eq!(body["exists"], false);
    let body = check_recipient(&base_url, "mallory").await;
    assert_eq!(body["exists"], false);
    let (status, _) = check_username(&base_url, "mallory").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_invalid_username_is_rejected() {
    let base_url = start_test_server().await;

    let (status, body) = check_username(&base_url, "Not A Name!").await;
    assert_eq!(status, 400);
    assert_eq!(body["status"], 400);
    assert_eq!(body["title"], "Bad Request");
}
