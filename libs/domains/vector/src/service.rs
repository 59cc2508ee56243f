use std::sync::Arc;

use crate::embedding::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};
use crate::models::{Document, IndexConfig, ScoredDocument, Vector};
use crate::repository::VectorRepository;

/// High-level similarity search over one product-document collection.
///
/// Embeds the query once per call; the repository and embedding provider are
/// constructed once per process (see [`crate::lazy::LazyIndex`]) and reused.
pub struct SimilarityIndex<R: VectorRepository> {
    repository: R,
    embedder: Arc<dyn EmbeddingProvider>,
    config: IndexConfig,
}

impl<R: VectorRepository> SimilarityIndex<R> {
    /// Wrap a repository and embedding provider, creating the collection if
    /// it does not exist yet.
    pub async fn new(
        repository: R,
        embedder: Arc<dyn EmbeddingProvider>,
        config: IndexConfig,
    ) -> VectorResult<Self> {
        repository
            .ensure_collection(&config.collection, config.dimension)
            .await?;

        Ok(Self {
            repository,
            embedder,
            config,
        })
    }

    /// Top-k nearest documents for a text query, ordered by descending
    /// similarity. An empty index yields an empty list.
    pub async fn search(&self, query: &str, k: u64) -> VectorResult<Vec<ScoredDocument>> {
        if k == 0 {
            return Ok(vec![]);
        }

        let vector = self.embedder.embed(query).await?;

        let results = self
            .repository
            .search(&self.config.collection, vector, k)
            .await?;

        tracing::debug!(hits = results.len(), k, "Similarity search completed");

        Ok(results.into_iter().map(|r| r.into()).collect())
    }

    /// Drop and recreate the collection (seeder path: reseeding replaces
    /// the index rather than accumulating stale points).
    pub async fn reset(&self) -> VectorResult<()> {
        self.repository
            .drop_collection(&self.config.collection)
            .await?;
        self.repository
            .ensure_collection(&self.config.collection, self.config.dimension)
            .await
    }

    /// Embed and upsert documents (seeder path).
    pub async fn index(&self, documents: Vec<Document>) -> VectorResult<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != documents.len() {
            return Err(VectorError::Embedding(format!(
                "Expected {} embeddings, got {}",
                documents.len(),
                embeddings.len()
            )));
        }

        let count = documents.len();
        let vectors: Vec<Vector> = documents
            .into_iter()
            .zip(embeddings)
            .map(|(doc, values)| {
                let payload = doc.payload();
                Vector::new(doc.id, values).with_payload(payload)
            })
            .collect();

        self.repository
            .upsert_batch(&self.config.collection, vectors)
            .await?;

        Ok(count)
    }
}
