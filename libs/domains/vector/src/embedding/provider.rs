use async_trait::async_trait;

use crate::error::VectorResult;

/// Trait for embedding generation providers
///
/// Implementations can use different embedding APIs (OpenAI-compatible
/// services, local models).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>>;

    /// Generate embeddings for multiple texts in batch, preserving order
    async fn embed_batch(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>>;
}
