//! Vector Domain Library
//!
//! The similarity index the chat orchestrator retrieves grounding context
//! from: a Qdrant collection holding one embedded document per catalog
//! product.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │    LazyIndex     │  ← single-flight lazy construction, shared process-wide
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ SimilarityIndex  │  ← embed query once, top-k search, document mapping
//! └────────┬─────────┘
//!          │
//! ┌────────▼────────┐     ┌──────────────────┐
//! │ VectorRepository│     │ EmbeddingProvider │
//! │    (trait)      │     │     (trait)       │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//! ┌────────▼────────┐     ┌────────▼─────────┐
//! │ QdrantRepository│     │  OpenAIProvider   │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! The index is read-only at serving time; ingestion happens offline through
//! the seeder, which feeds [`SimilarityIndex::index`] one document per
//! product.

pub mod embedding;
pub mod error;
pub mod lazy;
pub mod models;
pub mod qdrant;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{EmbeddingConfig, EmbeddingProvider, OpenAIProvider};
pub use error::{VectorError, VectorResult};
pub use lazy::LazyIndex;
pub use models::{Document, IndexConfig, ScoredDocument, SearchResult, Vector};
pub use qdrant::{QdrantConfig, QdrantRepository};
pub use repository::VectorRepository;
pub use service::SimilarityIndex;
