use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::ChatResult;
use crate::models::{ChatMessage, ChatSession, MessageRole};

/// Repository trait for session/message persistence.
///
/// Sessions are append-only conversation threads; messages are immutable
/// once written. Implementations must serialize
/// [`get_or_create_current`](ChatRepository::get_or_create_current) per user
/// so concurrent first messages observe exactly one session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Unconditionally create a fresh session for the user
    async fn create_session(&self, user_id: Uuid) -> ChatResult<ChatSession>;

    /// Fetch a session only if it is owned by `user_id`
    async fn get_session(&self, session_id: Uuid, user_id: Uuid)
    -> ChatResult<Option<ChatSession>>;

    /// The user's most recently created session, created if none exists.
    /// Creation is serialized per user.
    async fn get_or_create_current(&self, user_id: Uuid) -> ChatResult<ChatSession>;

    /// Append an immutable message with a server-assigned timestamp
    async fn append_message(
        &self,
        session_id: Uuid,
        role: MessageRole,
        content: &str,
    ) -> ChatResult<ChatMessage>;

    /// Sessions for a user, most recently created first
    async fn list_sessions(&self, user_id: Uuid) -> ChatResult<Vec<ChatSession>>;

    /// Messages in a session, ascending by timestamp/insertion order
    async fn list_messages(&self, session_id: Uuid) -> ChatResult<Vec<ChatMessage>>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    sessions: Vec<ChatSession>,
    messages: HashMap<Uuid, Vec<ChatMessage>>,
}

/// In-memory implementation of ChatRepository (for development/testing).
///
/// A single async mutex guards all state, which trivially serializes
/// session creation per user.
#[derive(Debug, Default, Clone)]
pub struct InMemoryChatRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_session(user_id: Uuid) -> ChatSession {
        ChatSession {
            id: Uuid::now_v7(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_session(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        let mut state = self.state.lock().await;

        let session = Self::new_session(user_id);
        state.sessions.push(session.clone());
        state.messages.insert(session.id, Vec::new());

        tracing::info!(session_id = %session.id, user_id = %user_id, "Created chat session");
        Ok(session)
    }

    async fn get_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> ChatResult<Option<ChatSession>> {
        let state = self.state.lock().await;

        Ok(state
            .sessions
            .iter()
            .find(|s| s.id == session_id && s.user_id == user_id)
            .cloned())
    }

    async fn get_or_create_current(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        let mut state = self.state.lock().await;

        // UUIDv7 ids are creation-ordered, so they break created_at ties
        let current = state
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .max_by_key(|s| (s.created_at, s.id))
            .cloned();

        if let Some(session) = current {
            return Ok(session);
        }

        let session = Self::new_session(user_id);
        state.sessions.push(session.clone());
        state.messages.insert(session.id, Vec::new());

        tracing::info!(session_id = %session.id, user_id = %user_id, "Created first chat session");
        Ok(session)
    }

    async fn append_message(
        &self,
        session_id: Uuid,
        role: MessageRole,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        let mut state = self.state.lock().await;

        let message = ChatMessage {
            id: Uuid::now_v7(),
            session_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        state
            .messages
            .entry(session_id)
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    async fn list_sessions(&self, user_id: Uuid) -> ChatResult<Vec<ChatSession>> {
        let state = self.state.lock().await;

        let mut sessions: Vec<ChatSession> = state
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();

        sessions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(sessions)
    }

    async fn list_messages(&self, session_id: Uuid) -> ChatResult<Vec<ChatMessage>> {
        let state = self.state.lock().await;

        Ok(state
            .messages
            .get(&session_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_or_create_creates_exactly_one() {
        let repo = InMemoryChatRepository::new();
        let user_id = Uuid::now_v7();

        let first = repo.get_or_create_current(user_id).await.unwrap();
        let second = repo.get_or_create_current(user_id).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.list_sessions(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_session() {
        let repo = InMemoryChatRepository::new();
        let user_id = Uuid::now_v7();

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.get_or_create_current(user_id).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(repo.list_sessions(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_new_session_becomes_current() {
        let repo = InMemoryChatRepository::new();
        let user_id = Uuid::now_v7();

        repo.get_or_create_current(user_id).await.unwrap();
        let fresh = repo.create_session(user_id).await.unwrap();

        let current = repo.get_or_create_current(user_id).await.unwrap();
        assert_eq!(current.id, fresh.id);
    }

    #[tokio::test]
    async fn test_ownership_check_hides_foreign_sessions() {
        let repo = InMemoryChatRepository::new();
        let alice = Uuid::now_v7();
        let mallory = Uuid::now_v7();

        let session = repo.create_session(alice).await.unwrap();

        assert!(repo.get_session(session.id, alice).await.unwrap().is_some());
        assert!(repo.get_session(session.id, mallory).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_messages_round_trip_in_order() {
        let repo = InMemoryChatRepository::new();
        let session = repo.create_session(Uuid::now_v7()).await.unwrap();

        repo.append_message(session.id, MessageRole::User, "cheap laptops")
            .await
            .unwrap();
        repo.append_message(session.id, MessageRole::Assistant, "Check out Laptop 7.")
            .await
            .unwrap();

        let messages = repo.list_messages(session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert!(messages[0].created_at <= messages[1].created_at);
    }

    #[tokio::test]
    async fn test_sessions_listed_most_recent_first() {
        let repo = InMemoryChatRepository::new();
        let user_id = Uuid::now_v7();

        let first = repo.create_session(user_id).await.unwrap();
        let second = repo.create_session(user_id).await.unwrap();

        let sessions = repo.list_sessions(user_id).await.unwrap();
        assert_eq!(sessions[0].id, second.id);
        assert_eq!(sessions[1].id, first.id);
    }
}
