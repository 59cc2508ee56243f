use async_trait::async_trait;
use std::sync::Arc;

use domain_vector::{LazyIndex, VectorRepository};

use crate::error::{ChatError, ChatResult};

/// A retrieved grounding snippet
#[derive(Debug, Clone)]
pub struct ContextChunk {
    pub text: String,
    pub score: f32,
}

/// Seam between the orchestrator and the similarity index.
///
/// Kept minimal so tests can stub retrieval without a vector store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Top-k most similar documents, descending by similarity. Empty when
    /// the index holds no documents.
    async fn retrieve(&self, query: &str, k: u64) -> ChatResult<Vec<ContextChunk>>;
}

/// Production retriever backed by the lazily initialized similarity index
pub struct SimilarityRetriever<R: VectorRepository> {
    index: Arc<LazyIndex<R>>,
}

impl<R: VectorRepository> SimilarityRetriever<R> {
    pub fn new(index: Arc<LazyIndex<R>>) -> Self {
        Self { index }
    }
}

#[async_trait]
impl<R: VectorRepository + 'static> ContextRetriever for SimilarityRetriever<R> {
    async fn retrieve(&self, query: &str, k: u64) -> ChatResult<Vec<ContextChunk>> {
        let index = self
            .index
            .get()
            .await
            .map_err(|e| ChatError::Retrieval(e.to_string()))?;

        let documents = index
            .search(query, k)
            .await
            .map_err(|e| ChatError::Retrieval(e.to_string()))?;

        Ok(documents
            .into_iter()
            .map(|d| ContextChunk {
                text: d.text,
                score: d.score,
            })
            .collect())
    }
}
