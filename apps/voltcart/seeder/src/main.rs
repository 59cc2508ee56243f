//! Offline catalog ingestion.
//!
//! Reads the product catalog JSON, replaces the `products` table, and
//! rebuilds the similarity index: one embedded document per product, tagged
//! with the product id. Run once before serving; the API never writes to
//! the index.
//!
//! Usage: `voltcart_seeder [path/to/products.json]` (default: data/products.json)

use std::sync::Arc;

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::PostgresConfig;
use domain_catalog::{CatalogService, NewProduct, PgProductRepository};
use domain_vector::{
    Document, EmbeddingConfig, IndexConfig, OpenAIProvider, QdrantConfig, QdrantRepository,
    SimilarityIndex,
};
use eyre::WrapErr;
use migration::{Migrator, MigratorTrait};
use serde::Deserialize;
use tracing::info;

/// Catalog JSON entry; `id` in the file is ignored, identities are assigned
/// on insert
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    description: String,
    price: f64,
    category: String,
    image: Option<String>,
}

impl From<SeedProduct> for NewProduct {
    fn from(item: SeedProduct) -> Self {
        Self {
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            image_url: item.image,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/products.json".to_string());

    let raw = std::fs::read_to_string(&path).wrap_err_with(|| format!("Reading {}", path))?;
    let items: Vec<SeedProduct> =
        serde_json::from_str(&raw).wrap_err_with(|| format!("Parsing {}", path))?;
    info!(products = items.len(), path, "Loaded catalog file");

    let db = database::connect_from_config_with_retry(PostgresConfig::from_env()?, None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let repository = QdrantRepository::new(QdrantConfig::from_env()?)
        .map_err(|e| eyre::eyre!("Qdrant client: {}", e))?;
    let embedder = Arc::new(OpenAIProvider::new(EmbeddingConfig::from_env()?));
    let index = SimilarityIndex::new(repository, embedder, IndexConfig::from_env()?)
        .await
        .map_err(|e| eyre::eyre!("Similarity index: {}", e))?;

    // Reseeding replaces both stores
    let catalog = CatalogService::new(PgProductRepository::new(db));
    catalog.clear().await?;
    index.reset().await.map_err(|e| eyre::eyre!("{}", e))?;

    let mut documents = Vec::with_capacity(items.len());
    for item in items {
        let product = catalog.add_product(item.into()).await?;
        documents.push(Document {
            id: product.id,
            text: product.document_text(),
            product_id: Some(product.id),
        });
    }

    let indexed = index
        .index(documents)
        .await
        .map_err(|e| eyre::eyre!("Indexing failed: {}", e))?;

    info!(products = indexed, "Catalog seeded and index rebuilt");
    Ok(())
}
