//! Handler tests for the chat domain
//!
//! Drive the chat router end-to-end with an in-memory repository and stubbed
//! retrieval/completion collaborators: request deserialization, auth
//! enforcement, status codes and the stored-turn semantics.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{Extension, Router};
use axum_helpers::auth::{JwtAuth, JwtConfig};
use domain_chat::completion::CompletionProvider;
use domain_chat::handlers::{self, ChatState};
use domain_chat::retrieval::{ContextChunk, ContextRetriever};
use domain_chat::{
    ChatError, ChatMessage, ChatOrchestrator, ChatResult, ChatService, InMemoryChatRepository,
    MessageRole, SessionSummary,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// Stub retriever returning a fixed set of product snippets
struct StubRetriever {
    chunks: Vec<&'static str>,
}

#[async_trait]
impl ContextRetriever for StubRetriever {
    async fn retrieve(&self, _query: &str, k: u64) -> ChatResult<Vec<ContextChunk>> {
        Ok(self
            .chunks
            .iter()
            .take(k as usize)
            .enumerate()
            .map(|(i, text)| ContextChunk {
                text: text.to_string(),
                score: 1.0 - i as f32 * 0.1,
            })
            .collect())
    }
}

/// Stub completion client: fixed reply, or a fixed upstream failure
struct StubCompletion {
    reply: Option<&'static str>,
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(
        &self,
        _system_prompt: &str,
        _context_block: &str,
        _user_query: &str,
    ) -> ChatResult<String> {
        match self.reply {
            Some(reply) => Ok(reply.to_string()),
            None => Err(ChatError::Upstream {
                status: 503,
                body: "overloaded".to_string(),
            }),
        }
    }
}

fn jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig {
        secret: "chat-handler-tests".to_string(),
        token_ttl_secs: 3600,
    })
}

fn app_with(completion: StubCompletion) -> (Router, JwtAuth) {
    let auth = jwt_auth();

    let orchestrator = ChatOrchestrator::new(
        ChatService::new(InMemoryChatRepository::new()),
        Arc::new(StubRetriever {
            chunks: vec![
                "Laptop 7. Slim ultrabook. Price: 899.00",
                "Laptop Air. Budget laptop. Price: 499.00",
            ],
        }),
        Arc::new(completion),
    );

    let router = Router::new()
        .nest("/chat", handlers::router(ChatState::new(orchestrator)))
        .layer(Extension(auth.clone()));

    (router, auth)
}

fn app() -> (Router, JwtAuth) {
    app_with(StubCompletion {
        reply: Some("Check out Laptop 7."),
    })
}

fn bearer(auth: &JwtAuth, user_id: Uuid) -> String {
    format!("Bearer {}", auth.create_token(user_id, "alice").unwrap())
}

fn post_chat(token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("authorization", token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", token)
        .body(Body::empty())
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_first_chat_turn_creates_session_and_stores_both_turns() {
    let (app, auth) = app();
    let token = bearer(&auth, Uuid::now_v7());

    let response = app
        .clone()
        .oneshot(post_chat(&token, r#"{"query":"cheap laptops"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["response"], "Check out Laptop 7.");
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let messages_response = app
        .oneshot(get_with_token(
            &format!("/chat/messages/{}", session_id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(messages_response.status(), StatusCode::OK);

    let messages: Vec<ChatMessage> = json_body(messages_response.into_body()).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "cheap laptops");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].content, "Check out Laptop 7.");
    assert!(messages[0].created_at <= messages[1].created_at);
}

#[tokio::test]
async fn test_chat_without_token_is_401() {
    let (app, _) = app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"query":"cheap laptops"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_query_is_400() {
    let (app, auth) = app();
    let token = bearer(&auth, Uuid::now_v7());

    let response = app
        .oneshot(post_chat(&token, r#"{"query":""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_session_is_404_and_leaks_nothing() {
    let (app, auth) = app();
    let alice = Uuid::now_v7();
    let mallory = Uuid::now_v7();

    // Alice builds up a session
    let response = app
        .clone()
        .oneshot(post_chat(
            &bearer(&auth, alice),
            r#"{"query":"cheap laptops"}"#,
        ))
        .await
        .unwrap();
    let body: serde_json::Value = json_body(response.into_body()).await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    // Mallory guesses the id
    let mallory_token = bearer(&auth, mallory);
    let stolen_read = app
        .clone()
        .oneshot(get_with_token(
            &format!("/chat/messages/{}", session_id),
            &mallory_token,
        ))
        .await
        .unwrap();
    assert_eq!(stolen_read.status(), StatusCode::NOT_FOUND);

    let stolen_write = app
        .oneshot(post_chat(
            &mallory_token,
            &format!(r#"{{"query":"hijack","session_id":"{}"}}"#, session_id),
        ))
        .await
        .unwrap();
    assert_eq!(stolen_write.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_failed_generation_returns_error_and_keeps_user_turn() {
    let (app, auth) = app_with(StubCompletion { reply: None });
    let token = bearer(&auth, Uuid::now_v7());

    let response = app
        .clone()
        .oneshot(post_chat(&token, r#"{"query":"cheap laptops"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(error["error"]["type"], "upstream_error");

    // The user's turn is preserved, no assistant turn was fabricated
    let sessions_response = app
        .clone()
        .oneshot(get_with_token("/chat/sessions", &token))
        .await
        .unwrap();
    let sessions: Vec<SessionSummary> = json_body(sessions_response.into_body()).await;
    assert_eq!(sessions.len(), 1);

    let messages_response = app
        .oneshot(get_with_token(
            &format!("/chat/messages/{}", sessions[0].id),
            &token,
        ))
        .await
        .unwrap();
    let messages: Vec<ChatMessage> = json_body(messages_response.into_body()).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::User);
}

#[tokio::test]
async fn test_reset_then_implicit_chat_uses_fresh_session() {
    let (app, auth) = app();
    let token = bearer(&auth, Uuid::now_v7());

    // Seed an older session
    app.clone()
        .oneshot(post_chat(&token, r#"{"query":"cheap laptops"}"#))
        .await
        .unwrap();

    let reset_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat/reset")
                .header("authorization", &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(reset_response.status(), StatusCode::OK);

    let reset: serde_json::Value = json_body(reset_response.into_body()).await;
    let fresh_id = reset["session_id"].as_str().unwrap().to_string();
    assert!(reset["created_at"].as_str().is_some());

    let chat_response = app
        .clone()
        .oneshot(post_chat(&token, r#"{"query":"gaming mice"}"#))
        .await
        .unwrap();
    let body: serde_json::Value = json_body(chat_response.into_body()).await;
    assert_eq!(body["session_id"].as_str().unwrap(), fresh_id);

    // Most recent first: the reset session leads the listing
    let sessions_response = app
        .oneshot(get_with_token("/chat/sessions", &token))
        .await
        .unwrap();
    let sessions: Vec<SessionSummary> = json_body(sessions_response.into_body()).await;
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id.to_string(), fresh_id);
}

#[tokio::test]
async fn test_empty_index_still_replies() {
    let auth = jwt_auth();
    let orchestrator = ChatOrchestrator::new(
        ChatService::new(InMemoryChatRepository::new()),
        Arc::new(StubRetriever { chunks: vec![] }),
        Arc::new(StubCompletion {
            reply: Some("We don't carry that yet."),
        }),
    );
    let app = Router::new()
        .nest("/chat", handlers::router(ChatState::new(orchestrator)))
        .layer(Extension(auth.clone()));

    let response = app
        .oneshot(post_chat(
            &bearer(&auth, Uuid::now_v7()),
            r#"{"query":"quantum toasters"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["response"], "We don't carry that yet.");
}
