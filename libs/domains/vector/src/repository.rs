use async_trait::async_trait;

use crate::error::VectorResult;
use crate::models::{SearchResult, Vector};

/// Repository trait for vector storage operations
///
/// Abstracts the underlying vector database (Qdrant). The index is built
/// once by the seeder and read-only at serving time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Create the collection if it does not exist yet
    async fn ensure_collection(&self, collection: &str, dimension: u64) -> VectorResult<()>;

    /// Drop the collection if it exists (reseeding replaces the index)
    async fn drop_collection(&self, collection: &str) -> VectorResult<()>;

    /// Upsert vectors in batch (ingestion path)
    async fn upsert_batch(&self, collection: &str, vectors: Vec<Vector>) -> VectorResult<()>;

    /// Nearest-neighbor search, at most `limit` hits ordered by descending
    /// similarity. An empty collection yields an empty list, not an error.
    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<SearchResult>>;
}
