use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{NewProduct, Product, ProductFilter};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product (seeder path)
    async fn create(&self, input: NewProduct) -> CatalogResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products with optional filters
    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>>;

    /// Remove every product (seeder path: reseeding replaces the catalog)
    async fn clear(&self) -> CatalogResult<u64>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> CatalogResult<Product> {
        let product = Product {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
        };

        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn clear(&self) -> CatalogResult<u64> {
        let mut products = self.products.write().await;
        let removed = products.len() as u64;
        products.clear();
        Ok(removed)
    }
}
