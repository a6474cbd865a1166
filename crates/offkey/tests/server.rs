//! Integration tests for the Offkey server: full WebSocket round trips
//! through the handler, gateway, and coordinator.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use offkey::{OffkeyServerBuilder, CODE_LEN};
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a server on a random port and returns the address.
async fn start_server() -> String {
    let server = OffkeyServerBuilder::new()
        .bind("127.0.0.1:0")
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

async fn connect(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send_json(ws: &mut ClientWs, value: Value) {
    // Browser clients speak text frames.
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("send");
}

async fn recv_json(ws: &mut ClientWs) -> Value {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("recv");
    serde_json::from_slice(&msg.into_data()).expect("decode")
}

/// Joins with a blank code to create a lobby; returns its code.
async fn create_lobby(ws: &mut ClientWs, user: &str) -> String {
    send_json(ws, json!({"type": "join_lobby", "user": user})).await;
    let event = recv_json(ws).await;
    assert_eq!(event["type"], "lobby_joined");
    event["lobby"].as_str().expect("lobby code").to_string()
}

// =========================================================================
// Join
// =========================================================================

#[tokio::test]
async fn test_create_lobby_returns_host_snapshot() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send_json(&mut ws, json!({"type": "join_lobby", "user": "Alice"})).await;
    let event = recv_json(&mut ws).await;

    assert_eq!(event["type"], "lobby_joined");
    assert_eq!(event["username"], "Alice");
    assert_eq!(event["is_host"], true);
    assert_eq!(event["host"], "Alice");
    assert_eq!(event["game_started"], false);
    assert_eq!(event["players"].as_array().unwrap().len(), 1);
    let code = event["lobby"].as_str().unwrap();
    assert_eq!(code.len(), CODE_LEN);
    assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn test_join_broadcasts_to_existing_members() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send_json(&mut bob, json!({"type": "join_lobby", "user": "Bob", "lobby": code})).await;

    // Both members receive the identical snapshot for Bob's join.
    for ws in [&mut alice, &mut bob] {
        let event = recv_json(ws).await;
        assert_eq!(event["type"], "lobby_joined");
        assert_eq!(event["username"], "Bob");
        assert_eq!(event["is_host"], false);
        assert_eq!(event["players"].as_array().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_join_unknown_code_returns_join_error() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    send_json(&mut ws, json!({"type": "join_lobby", "user": "Alice", "lobby": "ZZZZZZ"})).await;
    let event = recv_json(&mut ws).await;

    assert_eq!(event["type"], "join_error");
    assert_eq!(event["message"], "LOBBY_NOT_FOUND");
}

#[tokio::test]
async fn test_join_duplicate_nickname_returns_join_error() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut imposter = connect(&addr).await;
    send_json(&mut imposter, json!({"type": "join_lobby", "user": "Alice", "lobby": code})).await;
    let event = recv_json(&mut imposter).await;

    assert_eq!(event["type"], "join_error");
    assert_eq!(event["message"], "NICKNAME_TAKEN");
}

// =========================================================================
// Exit
// =========================================================================

#[tokio::test]
async fn test_host_disconnect_dismantles_lobby() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send_json(&mut bob, json!({"type": "join_lobby", "user": "Bob", "lobby": code})).await;
    recv_json(&mut alice).await; // Bob's join broadcast
    recv_json(&mut bob).await;

    alice.close(None).await.expect("close");

    let event = recv_json(&mut bob).await;
    assert_eq!(event["type"], "lobby_dismantled");
}

#[tokio::test]
async fn test_leave_lobby_broadcasts_user_left() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send_json(&mut bob, json!({"type": "join_lobby", "user": "Bob", "lobby": code})).await;
    recv_json(&mut alice).await;
    recv_json(&mut bob).await;

    send_json(&mut bob, json!({"type": "leave_lobby"})).await;

    let event = recv_json(&mut alice).await;
    assert_eq!(event["type"], "user_left");
    assert_eq!(event["user"], "Bob");
}

// =========================================================================
// Start
// =========================================================================

#[tokio::test]
async fn test_game_init_distributes_distinct_prompts() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send_json(&mut bob, json!({"type": "join_lobby", "user": "Bob", "lobby": code})).await;
    recv_json(&mut alice).await;
    recv_json(&mut bob).await;

    send_json(
        &mut alice,
        json!({
            "type": "game_init",
            "lobbyId": code,
            "gameMode": "CLASSIC",
            "settings": {"inputList": "Song A, Song B, Song C", "roundDuration": 60}
        }),
    )
    .await;

    let mut prompts = Vec::new();
    for ws in [&mut alice, &mut bob] {
        let event = recv_json(ws).await;
        assert_eq!(event["type"], "game_start");
        assert_eq!(event["gameMode"], "CLASSIC");
        assert_eq!(event["settings"]["roundDuration"], 60);
        let prompt = event["assignedPrompt"].as_str().expect("prompt").to_string();
        assert!(["Song A", "Song B", "Song C"].contains(&prompt.as_str()));
        prompts.push(prompt);
    }
    assert_ne!(prompts[0], prompts[1], "prompts must be distinct");
}

#[tokio::test]
async fn test_game_init_blind_karaoke_has_no_prompt() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    send_json(
        &mut alice,
        json!({"type": "game_init", "lobbyId": code, "gameMode": "BLIND_KARAOKE"}),
    )
    .await;

    let event = recv_json(&mut alice).await;
    assert_eq!(event["type"], "game_start");
    assert_eq!(event["gameMode"], "BLIND_KARAOKE");
    assert_eq!(event["assignedPrompt"], Value::Null);
}

#[tokio::test]
async fn test_game_init_by_non_host_returns_start_error() {
    let addr = start_server().await;
    let mut alice = connect(&addr).await;
    let code = create_lobby(&mut alice, "Alice").await;

    let mut bob = connect(&addr).await;
    send_json(&mut bob, json!({"type": "join_lobby", "user": "Bob", "lobby": code})).await;
    recv_json(&mut alice).await;
    recv_json(&mut bob).await;

    send_json(
        &mut bob,
        json!({"type": "game_init", "lobbyId": code, "gameMode": "CLASSIC"}),
    )
    .await;

    let event = recv_json(&mut bob).await;
    assert_eq!(event["type"], "start_error");
    assert!(
        event["message"].as_str().unwrap().contains("host"),
        "unexpected message: {event}"
    );
}

#[tokio::test]
async fn test_malformed_frame_is_ignored() {
    let addr = start_server().await;
    let mut ws = connect(&addr).await;

    ws.send(Message::Text("not json".into())).await.expect("send");

    // The connection survives and keeps serving.
    send_json(&mut ws, json!({"type": "join_lobby", "user": "Alice"})).await;
    let event = recv_json(&mut ws).await;
    assert_eq!(event["type"], "lobby_joined");
}
