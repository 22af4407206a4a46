//! Web API Tests
//!
//! Integration tests for the room, history and account endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;
use huddle::chat::{MessageStore, NewMessage};
use huddle::web::handlers::{AppState, ROOM_CREATED, ROOM_CREATE_FAILED};
use huddle::web::router::create_router;
use huddle::{Database, RoomSummary, UserRepository};
use serde_json::{json, Value};
use std::sync::Arc;

/// Create a test server with an in-memory database.
async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let app_state = Arc::new(AppState::new(db.clone()));
    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");
    (server, db)
}

/// Create a room through the API and return its id.
async fn make_room(server: &TestServer, name: &str, maker: &str, invites: &[&str]) -> String {
    let response = server
        .post("/make_room")
        .json(&json!({
            "roomMaker": maker,
            "roomName": name,
            "invites": invites,
        }))
        .await;
    response.assert_status_ok();

    let lines: Vec<String> = response.json();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], ROOM_CREATED);
    lines[1].clone()
}

async fn room_list(server: &TestServer, email: &str) -> Vec<RoomSummary> {
    let response = server
        .get("/get_room_list")
        .add_query_param("email", email)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_index() {
    let (server, _db) = create_test_server().await;
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "Hello World");
}

#[tokio::test]
async fn test_health() {
    let (server, _db) = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_make_room_and_list() {
    let (server, _db) = create_test_server().await;

    let room_id = make_room(&server, "Trip", "alice@x.com", &["bob@x.com"]).await;

    let rooms = room_list(&server, "bob@x.com").await;
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].room_id, room_id);
    assert_eq!(rooms[0].room_name, "Trip");
    assert_eq!(rooms[0].room_maker, "alice@x.com");
    assert!(rooms[0].invites.contains(&"alice@x.com".to_string()));
    assert!(rooms[0].invites.contains(&"bob@x.com".to_string()));
}

#[tokio::test]
async fn test_make_room_membership_has_no_duplicates() {
    let (server, _db) = create_test_server().await;

    make_room(&server, "Trip", "alice@x.com", &["alice@x.com", "bob@x.com"]).await;

    let rooms = room_list(&server, "alice@x.com").await;
    assert_eq!(rooms[0].invites, vec!["alice@x.com", "bob@x.com"]);
}

#[tokio::test]
async fn test_make_room_empty_name_is_noop() {
    let (server, _db) = create_test_server().await;
    let before = room_list(&server, "alice@x.com").await;

    let response = server
        .post("/make_room")
        .json(&json!({
            "roomMaker": "alice@x.com",
            "roomName": "",
            "invites": [],
        }))
        .await;
    response.assert_status_ok();
    let lines: Vec<String> = response.json();
    assert!(lines.is_empty());

    assert_eq!(room_list(&server, "alice@x.com").await, before);
}

#[tokio::test]
async fn test_make_room_failure_leaves_no_trace() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/make_room")
        .json(&json!({
            "roomMaker": "alice@x.com",
            "roomName": "Broken",
            "invites": ["bob@x.com", ""],
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let lines: Vec<String> = response.json();
    assert_eq!(lines, vec![ROOM_CREATE_FAILED]);

    assert!(room_list(&server, "bob@x.com").await.is_empty());
    assert!(room_list(&server, "alice@x.com").await.is_empty());
}

#[tokio::test]
async fn test_room_list_unknown_user_is_empty() {
    let (server, _db) = create_test_server().await;
    assert!(room_list(&server, "nobody@x.com").await.is_empty());
}

#[tokio::test]
async fn test_room_list_is_stable() {
    let (server, _db) = create_test_server().await;
    make_room(&server, "One", "alice@x.com", &[]).await;
    make_room(&server, "Two", "bob@x.com", &["alice@x.com"]).await;

    let first = room_list(&server, "alice@x.com").await;
    let second = room_list(&server, "alice@x.com").await;
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_message_history() {
    let (server, db) = create_test_server().await;
    let room_id = make_room(&server, "Trip", "alice@x.com", &["bob@x.com"]).await;

    let store = MessageStore::new(db.pool());
    store
        .append(&NewMessage::stamped("Alice", "alice@x.com", &room_id, "first"))
        .await
        .unwrap();
    store
        .append(&NewMessage::stamped("Bob", "bob@x.com", &room_id, "second"))
        .await
        .unwrap();

    let response = server
        .get("/get_message")
        .add_query_param("roomId", &room_id)
        .await;
    response.assert_status_ok();

    let messages: Vec<Value> = response.json();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["msg"], "first");
    assert_eq!(messages[0]["senderEmail"], "alice@x.com");
    assert_eq!(messages[1]["msg"], "second");
    assert_eq!(messages[1]["roomId"], room_id.as_str());
    assert!(messages[0]["id"].as_i64().unwrap() < messages[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_get_message_unknown_room_is_empty() {
    let (server, _db) = create_test_server().await;
    let response = server
        .get("/get_message")
        .add_query_param("roomId", "no-such-room")
        .await;
    response.assert_status_ok();
    let messages: Vec<Value> = response.json();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_check_email() {
    let (server, db) = create_test_server().await;
    UserRepository::new(db.pool())
        .create("alice@x.com", "Alice")
        .await
        .unwrap();

    let response = server
        .get("/check_email")
        .add_query_param("email", "alice@x.com")
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<String>(), "ok");

    let response = server
        .get("/check_email")
        .add_query_param("email", "nobody@x.com")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<String>(), "no account matches this email");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (server, _db) = create_test_server().await;

    for path in ["/get_room_list", "/health", "/"] {
        let response = server
            .get(path)
            .add_query_param("email", "alice@x.com")
            .add_header(
                axum::http::header::ORIGIN,
                axum::http::HeaderValue::from_static("http://example.com"),
            )
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.header("access-control-allow-origin"),
            "*",
            "missing CORS header on {path}"
        );
    }
}
