//! Wire-level tests: a local axum server stands in for the Kindroid endpoint
//! and the real HTTP transport talks to it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use kinrelay_core::context::AugmentationContext;
use kinrelay_core::error::InferenceError;
use kinrelay_core::inference::InferenceResult;
use kinrelay_core::message::ConversationMessage;
use kinrelay_inference::{HttpTransport, KindroidClient, derive_requester_id};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(HeaderMap, Value)>>>);

impl Seen {
    fn last(&self) -> (HeaderMap, Value) {
        self.0.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Fake endpoint; the share code picks the scripted answer.
async fn infer(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let share_code = body["share_code"].as_str().unwrap_or_default().to_string();
    seen.0.lock().unwrap().push((headers, body));

    match share_code.as_str() {
        "ok" => (
            StatusCode::OK,
            json!({"success": true, "reply": "Hi @everyone!"}).to_string(),
        ),
        "busy" => (
            StatusCode::TOO_MANY_REQUESTS,
            json!({"success": false, "error": "slow down"}).to_string(),
        ),
        "bad" => (
            StatusCode::OK,
            json!({"success": false, "error": "bad share code"}).to_string(),
        ),
        "forbidden" => (
            StatusCode::FORBIDDEN,
            json!({"success": false, "error": "invalid api key"}).to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string()),
    }
}

async fn spawn_server() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1/discord-bot", post(infer))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1/discord-bot/"), seen)
}

fn client(endpoint: &str, context: AugmentationContext) -> KindroidClient {
    let transport = HttpTransport::new(endpoint, "kn_test_key", Duration::from_secs(5)).unwrap();
    KindroidClient::new(Arc::new(transport), Arc::new(context))
}

fn conversation() -> Vec<ConversationMessage> {
    vec![
        ConversationMessage::new("alice", "hello"),
        ConversationMessage::new("Zoë 🌸", "hi Mochi"),
    ]
}

#[tokio::test]
async fn success_roundtrip_sends_wire_contract() {
    let (endpoint, seen) = spawn_server().await;
    let context = AugmentationContext {
        preamble: Some("You are Mochi.".into()),
        ..Default::default()
    };

    let result = client(&endpoint, context)
        .invoke("ok", &conversation(), true)
        .await
        .unwrap();
    assert_eq!(
        result,
        InferenceResult::Success {
            reply: "Hi !".into()
        }
    );

    let (headers, body) = seen.last();
    assert_eq!(headers["authorization"], "Bearer kn_test_key");
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(
        headers["x-kindroid-requester"],
        derive_requester_id("Zoë 🌸").as_str()
    );

    assert_eq!(body["share_code"], "ok");
    assert_eq!(body["enable_filter"], true);
    let sent = body["conversation"].as_array().unwrap();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0]["username"], "system");
    assert_eq!(
        sent[0]["text"],
        "Behavior and persona instructions:\nYou are Mochi."
    );
    assert_eq!(sent[2], json!({"username": "Zoë 🌸", "text": "hi Mochi"}));
}

#[tokio::test]
async fn rate_limit_roundtrip() {
    let (endpoint, _seen) = spawn_server().await;
    let result = client(&endpoint, AugmentationContext::default())
        .invoke("busy", &conversation(), false)
        .await;
    assert_eq!(result, Ok(InferenceResult::RateLimited));
}

#[tokio::test]
async fn rejection_roundtrip() {
    let (endpoint, _seen) = spawn_server().await;
    let err = client(&endpoint, AugmentationContext::default())
        .invoke("bad", &conversation(), false)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "bad share code");
    assert_eq!(err.kind(), "remote_rejection");
}

#[tokio::test]
async fn error_status_roundtrip() {
    let (endpoint, _seen) = spawn_server().await;
    let client = client(&endpoint, AugmentationContext::default());

    let err = client
        .invoke("forbidden", &conversation(), false)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        InferenceError::Transport {
            status: Some(403),
            message: "invalid api key".into()
        }
    );

    let err = client
        .invoke("anything-else", &conversation(), false)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to get response from Kindroid");
}

#[tokio::test]
async fn empty_conversation_makes_no_request() {
    let (endpoint, seen) = spawn_server().await;
    let err = client(&endpoint, AugmentationContext::default())
        .invoke("ok", &[], false)
        .await
        .unwrap_err();
    assert_eq!(err, InferenceError::EmptyConversation);
    assert_eq!(seen.count(), 0);
}
