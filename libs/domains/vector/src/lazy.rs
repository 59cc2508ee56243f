use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::VectorResult;
use crate::repository::VectorRepository;
use crate::service::SimilarityIndex;

type InitFn<R> =
    Box<dyn Fn() -> BoxFuture<'static, VectorResult<SimilarityIndex<R>>> + Send + Sync>;

/// Process-wide single-flight lazy construction of the similarity index.
///
/// The index client and embedding provider are expensive to set up, so they
/// are built once: the first caller runs the factory while concurrent first
/// callers wait on the same cell, and every later call reuses the stored
/// instance. A failed construction leaves the cell empty, so the next
/// request retries instead of caching the error.
pub struct LazyIndex<R: VectorRepository> {
    cell: OnceCell<Arc<SimilarityIndex<R>>>,
    init: InitFn<R>,
}

impl<R: VectorRepository> LazyIndex<R> {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, VectorResult<SimilarityIndex<R>>> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    /// The shared index, constructing it on first use.
    pub async fn get(&self) -> VectorResult<Arc<SimilarityIndex<R>>> {
        let index = self
            .cell
            .get_or_try_init(|| async {
                Ok::<_, crate::error::VectorError>(Arc::new((self.init)().await?))
            })
            .await?;

        Ok(Arc::clone(index))
    }
}
