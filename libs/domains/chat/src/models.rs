use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Message sender tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            _ => Err(format!("Unknown message role: {}", s)),
        }
    }
}

/// Chat session - a bounded, ordered conversation thread owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Chat message - immutable once written
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// POST /chat request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ChatRequest {
    /// The user's natural-language query
    #[validate(length(min = 1, max = 4000))]
    pub query: String,
    /// Continue an existing session; omitted → the current session is used
    /// (created on first use)
    pub session_id: Option<Uuid>,
}

/// POST /chat response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// The assistant's reply
    pub response: String,
    /// The session the exchange was stored in
    pub session_id: Uuid,
}

/// POST /chat/reset response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ChatSession> for ResetResponse {
    fn from(session: ChatSession) -> Self {
        Self {
            session_id: session.id,
            created_at: session.created_at,
        }
    }
}

/// Session summary for GET /chat/sessions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ChatSession> for SessionSummary {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            created_at: session.created_at,
        }
    }
}
