use std::sync::Arc;
use uuid::Uuid;

use crate::completion::CompletionProvider;
use crate::error::{ChatError, ChatResult};
use crate::models::{ChatRequest, ChatResponse, ChatSession};
use crate::prompts;
use crate::repository::ChatRepository;
use crate::retrieval::ContextRetriever;
use crate::service::ChatService;

/// How many product snippets ground each completion
pub const CONTEXT_K: u64 = 4;

/// Per-request chat pipeline.
///
/// Terminal on every branch:
/// 1. resolve the session (explicit id with ownership check, or current)
/// 2. persist the user turn - a crash later still preserves it
/// 3. retrieve grounding context (empty context is valid)
/// 4. generate via the completion client
/// 5. persist the reply only on success - a failed generation never
///    fabricates a stored reply
/// 6. respond with the reply and the resolved session id
pub struct ChatOrchestrator<R: ChatRepository> {
    service: Arc<ChatService<R>>,
    retriever: Arc<dyn ContextRetriever>,
    completion: Arc<dyn CompletionProvider>,
}

impl<R: ChatRepository + 'static> ChatOrchestrator<R> {
    pub fn new(
        service: ChatService<R>,
        retriever: Arc<dyn ContextRetriever>,
        completion: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            retriever,
            completion,
        }
    }

    /// Shared handle to the underlying session service
    pub fn service(&self) -> Arc<ChatService<R>> {
        Arc::clone(&self.service)
    }

    /// One grounded request/response cycle for an authenticated user.
    pub async fn chat(&self, user_id: Uuid, request: ChatRequest) -> ChatResult<ChatResponse> {
        let session = match request.session_id {
            Some(session_id) => self.service.get_owned_session(session_id, user_id).await?,
            None => self.service.get_or_create_current(user_id).await?,
        };

        self.service
            .record_user_message(session.id, &request.query)
            .await?;

        let service = Arc::clone(&self.service);
        let retriever = Arc::clone(&self.retriever);
        let completion = Arc::clone(&self.completion);
        let session_id = session.id;
        let query = request.query;

        // Generation and reply persistence run on a detached task: if the
        // caller disconnects mid-completion, the handler future is dropped
        // but the generated reply is still persisted deterministically.
        let generation = tokio::spawn(async move {
            let chunks = retriever.retrieve(&query, CONTEXT_K).await?;
            let context = chunks
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");

            tracing::debug!(
                session_id = %session_id,
                retrieved = chunks.len(),
                "Built grounding context"
            );

            let reply = completion
                .complete(prompts::SYSTEM_PROMPT, &context, &query)
                .await?;

            service.record_assistant_message(session_id, &reply).await?;

            Ok::<String, ChatError>(reply)
        });

        let reply = generation
            .await
            .map_err(|e| ChatError::Internal(format!("Generation task failed: {}", e)))??;

        tracing::info!(session_id = %session_id, user_id = %user_id, "Chat turn completed");

        Ok(ChatResponse {
            response: reply,
            session_id,
        })
    }

    /// Explicit reset: a fresh session that becomes current for subsequent
    /// implicit turns. Prior sessions and their messages are untouched.
    pub async fn reset(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        let session = self.service.start_new_session(user_id).await?;
        tracing::info!(session_id = %session.id, user_id = %user_id, "Session reset");
        Ok(session)
    }
}
