use std::sync::Arc;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{NewProduct, Product, ProductFilter};
use crate::repository::ProductRepository;

/// Service layer for catalog reads and seeding
#[derive(Clone)]
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn add_product(&self, input: NewProduct) -> CatalogResult<Product> {
        self.repository.create(input).await
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn list_products(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Drop the whole catalog before a reseed
    pub async fn clear(&self) -> CatalogResult<u64> {
        self.repository.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let service = CatalogService::new(InMemoryProductRepository::new());
        let err = service.get_product(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
