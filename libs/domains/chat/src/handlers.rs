use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::{AuthUser, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::ChatResult;
use crate::models::{
    ChatMessage, ChatRequest, ChatResponse, MessageRole, ResetResponse, SessionSummary,
};
use crate::orchestrator::ChatOrchestrator;
use crate::repository::ChatRepository;
use crate::service::ChatService;

/// Shared state for chat handlers
pub struct ChatState<R: ChatRepository + 'static> {
    pub orchestrator: Arc<ChatOrchestrator<R>>,
    pub service: Arc<ChatService<R>>,
}

impl<R: ChatRepository + 'static> Clone for ChatState<R> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            service: Arc::clone(&self.service),
        }
    }
}

impl<R: ChatRepository + 'static> ChatState<R> {
    pub fn new(orchestrator: ChatOrchestrator<R>) -> Self {
        let service = orchestrator.service();
        Self {
            orchestrator: Arc::new(orchestrator),
            service,
        }
    }
}

/// OpenAPI documentation for the chat API
#[derive(OpenApi)]
#[openapi(
    paths(chat_handler, reset_handler, list_sessions, list_messages),
    components(schemas(
        ChatRequest,
        ChatResponse,
        ResetResponse,
        SessionSummary,
        ChatMessage,
        MessageRole
    ))
)]
pub struct ChatApiDoc;

/// Create the chat router. All routes require a bearer token; the
/// [`AuthUser`] extractor enforces it before any handler body runs.
pub fn router<R: ChatRepository + 'static>(state: ChatState<R>) -> Router {
    Router::new()
        .route("/", post(chat_handler))
        .route("/reset", post(reset_handler))
        .route("/sessions", get(list_sessions))
        .route("/messages/{session_id}", get(list_messages))
        .with_state(state)
}

/// One grounded chat turn
///
/// POST /chat
#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Reply generated and stored", body = ChatResponse),
        (status = 400, description = "Missing or empty query"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown or foreign session"),
        (status = 500, description = "Completion service error"),
        (status = 502, description = "Completion service unreachable")
    )
)]
async fn chat_handler<R: ChatRepository + 'static>(
    State(state): State<ChatState<R>>,
    user: AuthUser,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> ChatResult<Json<ChatResponse>> {
    let response = state.orchestrator.chat(user.id, request).await?;
    Ok(Json(response))
}

/// Start a fresh session; it becomes current for implicit turns
///
/// POST /chat/reset
#[utoipa::path(
    post,
    path = "/chat/reset",
    tag = "chat",
    responses(
        (status = 200, description = "Fresh session created", body = ResetResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
async fn reset_handler<R: ChatRepository + 'static>(
    State(state): State<ChatState<R>>,
    user: AuthUser,
) -> ChatResult<Json<ResetResponse>> {
    let session = state.orchestrator.reset(user.id).await?;
    Ok(Json(session.into()))
}

/// The caller's sessions, most recent first
///
/// GET /chat/sessions
#[utoipa::path(
    get,
    path = "/chat/sessions",
    tag = "chat",
    responses(
        (status = 200, description = "Session summaries", body = [SessionSummary]),
        (status = 401, description = "Missing or invalid token")
    )
)]
async fn list_sessions<R: ChatRepository + 'static>(
    State(state): State<ChatState<R>>,
    user: AuthUser,
) -> ChatResult<Json<Vec<SessionSummary>>> {
    let sessions = state.service.list_sessions(user.id).await?;
    Ok(Json(sessions.into_iter().map(|s| s.into()).collect()))
}

/// Ordered message history for an owned session
///
/// GET /chat/messages/:session_id
#[utoipa::path(
    get,
    path = "/chat/messages/{session_id}",
    tag = "chat",
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Messages, ascending by timestamp", body = [ChatMessage]),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Unknown or foreign session")
    )
)]
async fn list_messages<R: ChatRepository + 'static>(
    State(state): State<ChatState<R>>,
    user: AuthUser,
    Path(session_id): Path<Uuid>,
) -> ChatResult<Json<Vec<ChatMessage>>> {
    let messages = state.service.list_messages(session_id, user.id).await?;
    Ok(Json(messages))
}
