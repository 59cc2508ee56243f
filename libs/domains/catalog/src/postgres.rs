use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{NewProduct, Product, ProductFilter},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository using SeaORM
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> CatalogResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        tracing::debug!(product_id = %model.id, name = %model.name, "Inserted product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
        let mut query = entity::Entity::find();

        if let Some(category) = filter.category {
            query = query.filter(entity::Column::Category.eq(category));
        }

        let models = query
            .order_by_asc(entity::Column::Name)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn clear(&self) -> CatalogResult<u64> {
        let result = entity::Entity::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database error: {}", e)))?;

        tracing::info!(removed = result.rows_affected, "Cleared product catalog");
        Ok(result.rows_affected)
    }
}
