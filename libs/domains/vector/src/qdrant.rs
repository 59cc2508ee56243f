use std::collections::HashMap;

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default};
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, QueryPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder, point_id::PointIdOptions, value::Kind,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};
use crate::models::{SearchResult, Vector};
use crate::repository::VectorRepository;

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    pub url: String,
    pub api_key: Option<String>,
}

impl FromEnv for QdrantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("QDRANT_URL", "http://localhost:6334"),
            api_key: std::env::var("QDRANT_API_KEY").ok(),
        })
    }
}

/// Qdrant-backed implementation of [`VectorRepository`]
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub fn new(config: QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);
        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        let client = builder
            .build()
            .map_err(|e| VectorError::Config(format!("Qdrant client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn ensure_collection(&self, collection: &str, dimension: u64) -> VectorResult<()> {
        if self.client.collection_exists(collection).await? {
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(collection)
                    .vectors_config(VectorParamsBuilder::new(dimension, Distance::Cosine)),
            )
            .await?;

        tracing::info!(collection, dimension, "Created Qdrant collection");
        Ok(())
    }

    async fn drop_collection(&self, collection: &str) -> VectorResult<()> {
        if !self.client.collection_exists(collection).await? {
            return Ok(());
        }

        self.client.delete_collection(collection).await?;
        tracing::info!(collection, "Dropped Qdrant collection");
        Ok(())
    }

    async fn upsert_batch(&self, collection: &str, vectors: Vec<Vector>) -> VectorResult<()> {
        if vectors.is_empty() {
            return Ok(());
        }

        let count = vectors.len();
        let points = vectors
            .into_iter()
            .map(|v| {
                let payload = match v.payload {
                    Some(value) => Payload::try_from(value)
                        .map_err(|e| VectorError::Internal(format!("Invalid payload: {}", e)))?,
                    None => Payload::new(),
                };
                Ok(PointStruct::new(v.id.to_string(), v.values, payload))
            })
            .collect::<VectorResult<Vec<_>>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await?;

        tracing::info!(collection, count, "Upserted vectors");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: Vec<f32>,
        limit: u64,
    ) -> VectorResult<Vec<SearchResult>> {
        let response = self
            .client
            .query(
                QueryPointsBuilder::new(collection)
                    .query(vector)
                    .limit(limit)
                    .with_payload(true),
            )
            .await?;

        let results = response
            .result
            .into_iter()
            .map(|point| {
                let id = match point.id.and_then(|id| id.point_id_options) {
                    Some(PointIdOptions::Uuid(raw)) => raw.parse().unwrap_or_else(|_| Uuid::nil()),
                    _ => Uuid::nil(),
                };

                SearchResult {
                    id,
                    score: point.score,
                    payload: Some(payload_to_json(point.payload)),
                }
            })
            .collect();

        Ok(results)
    }
}

/// Flatten a Qdrant payload into plain JSON (scalar fields only; the index
/// stores nothing nested).
fn payload_to_json(payload: HashMap<String, qdrant_client::qdrant::Value>) -> serde_json::Value {
    let map = payload
        .into_iter()
        .filter_map(|(key, value)| {
            let json = match value.kind? {
                Kind::StringValue(s) => serde_json::Value::String(s),
                Kind::IntegerValue(i) => serde_json::Value::Number(i.into()),
                Kind::DoubleValue(d) => serde_json::Number::from_f64(d)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
                Kind::BoolValue(b) => serde_json::Value::Bool(b),
                _ => return None,
            };
            Some((key, json))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(map)
}
