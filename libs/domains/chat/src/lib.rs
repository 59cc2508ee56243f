//! Chat Domain
//!
//! The retrieval-augmented session layer: session/message persistence, the
//! completion client, and the orchestrator that ties them to the similarity
//! index for one grounded request/response cycle.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Handlers     │  ← /chat, /chat/reset, /chat/sessions, /chat/messages/{id}
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐   ┌───────────────────┐   ┌─────────────────────┐
//! │ ChatOrchestrator │──▶│ ContextRetriever  │   │ CompletionProvider  │
//! └────────┬─────────┘   │     (trait)       │   │      (trait)        │
//!          │             └────────┬──────────┘   └─────────┬───────────┘
//! ┌────────▼─────────┐   ┌────────▼──────────┐   ┌─────────▼───────────┐
//! │   ChatService    │   │SimilarityRetriever│   │ OpenRouterProvider  │
//! └────────┬─────────┘   └───────────────────┘   └─────────────────────┘
//!          │
//! ┌────────▼─────────┐
//! │  ChatRepository  │  ← trait + in-memory + Postgres
//! └──────────────────┘
//! ```
//!
//! Request cycle: resolve session → persist the user turn → retrieve top-k
//! product snippets → grounded completion → persist the reply only on
//! success → respond with the reply and the session id.

pub mod completion;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod postgres;
pub mod prompts;
pub mod repository;
pub mod retrieval;
pub mod service;

// Re-export commonly used types
pub use completion::{CompletionConfig, CompletionProvider, OpenRouterProvider};
pub use error::{ChatError, ChatResult};
pub use handlers::{ChatApiDoc, ChatState};
pub use models::{
    ChatMessage, ChatRequest, ChatResponse, ChatSession, MessageRole, ResetResponse,
    SessionSummary,
};
pub use orchestrator::{CONTEXT_K, ChatOrchestrator};
pub use postgres::PgChatRepository;
pub use repository::{ChatRepository, InMemoryChatRepository};
pub use retrieval::{ContextChunk, ContextRetriever, SimilarityRetriever};
pub use service::ChatService;
