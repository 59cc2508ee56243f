use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ChatError, ChatResult};
use crate::models::{ChatMessage, ChatSession, MessageRole};
use crate::repository::ChatRepository;

/// Session-store operations with ownership enforcement.
///
/// Every read of a specific session verifies ownership first; a miss and a
/// foreign session are indistinguishable to the caller.
#[derive(Clone)]
pub struct ChatService<R: ChatRepository> {
    repository: Arc<R>,
}

impl<R: ChatRepository> ChatService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The user's current session, created on first use
    pub async fn get_or_create_current(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        self.repository.get_or_create_current(user_id).await
    }

    /// Explicit reset: a fresh session that becomes current
    pub async fn start_new_session(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        self.repository.create_session(user_id).await
    }

    /// Ownership-checked lookup
    pub async fn get_owned_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> ChatResult<ChatSession> {
        self.repository
            .get_session(session_id, user_id)
            .await?
            .ok_or(ChatError::SessionNotFound(session_id))
    }

    pub async fn record_user_message(
        &self,
        session_id: Uuid,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        self.repository
            .append_message(session_id, MessageRole::User, content)
            .await
    }

    pub async fn record_assistant_message(
        &self,
        session_id: Uuid,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        self.repository
            .append_message(session_id, MessageRole::Assistant, content)
            .await
    }

    /// Session summaries, most recent first
    pub async fn list_sessions(&self, user_id: Uuid) -> ChatResult<Vec<ChatSession>> {
        self.repository.list_sessions(user_id).await
    }

    /// Ordered message history; 404s for unknown or foreign sessions
    pub async fn list_messages(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> ChatResult<Vec<ChatMessage>> {
        self.get_owned_session(session_id, user_id).await?;
        self.repository.list_messages(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryChatRepository;

    fn service() -> ChatService<InMemoryChatRepository> {
        ChatService::new(InMemoryChatRepository::new())
    }

    #[tokio::test]
    async fn test_foreign_session_reads_are_not_found() {
        let service = service();
        let alice = Uuid::now_v7();
        let mallory = Uuid::now_v7();

        let session = service.start_new_session(alice).await.unwrap();
        service
            .record_user_message(session.id, "my secret order")
            .await
            .unwrap();

        let err = service
            .list_messages(session.id, mallory)
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let err = service()
            .get_owned_session(Uuid::now_v7(), Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_owner_reads_messages_in_order() {
        let service = service();
        let alice = Uuid::now_v7();

        let session = service.get_or_create_current(alice).await.unwrap();
        service
            .record_user_message(session.id, "cheap laptops")
            .await
            .unwrap();
        service
            .record_assistant_message(session.id, "Check out Laptop 7.")
            .await
            .unwrap();

        let messages = service.list_messages(session.id, alice).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "cheap laptops");
        assert_eq!(messages[1].content, "Check out Laptop 7.");
    }
}
