use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Index configuration (collection name + embedding dimension)
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub collection: String,
    pub dimension: u64,
}

impl FromEnv for IndexConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            collection: env_or_default("VECTOR_COLLECTION", "products"),
            dimension: env_parse_or_default("VECTOR_DIMENSION", 1536)?,
        })
    }
}

/// A document to be projected into the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    /// Free text stored verbatim and returned by searches
    pub text: String,
    /// Originating catalog entry, carried as payload metadata
    pub product_id: Option<Uuid>,
}

impl Document {
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.text,
            "product_id": self.product_id,
        })
    }
}

/// A vector point with payload
#[derive(Debug, Clone)]
pub struct Vector {
    pub id: Uuid,
    pub values: Vec<f32>,
    pub payload: Option<serde_json::Value>,
}

impl Vector {
    pub fn new(id: Uuid, values: Vec<f32>) -> Self {
        Self {
            id,
            values,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Raw nearest-neighbor hit from the store
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: Uuid,
    /// Similarity under the collection's metric (cosine); higher is closer
    pub score: f32,
    pub payload: Option<serde_json::Value>,
}

/// A retrieved document with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub text: String,
    pub score: f32,
    pub product_id: Option<Uuid>,
}

impl From<SearchResult> for ScoredDocument {
    fn from(result: SearchResult) -> Self {
        let payload = result.payload.unwrap_or_default();

        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let product_id = payload
            .get("product_id")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok());

        Self {
            text,
            score: result.score,
            product_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_payload_round_trip() {
        let product_id = Uuid::now_v7();
        let doc = Document {
            id: Uuid::now_v7(),
            text: "Laptop 7. Slim ultrabook. Price: 899.00".to_string(),
            product_id: Some(product_id),
        };

        let scored: ScoredDocument = SearchResult {
            id: doc.id,
            score: 0.87,
            payload: Some(doc.payload()),
        }
        .into();

        assert_eq!(scored.text, doc.text);
        assert_eq!(scored.product_id, Some(product_id));
    }

    #[test]
    fn test_scored_document_tolerates_missing_payload() {
        let scored: ScoredDocument = SearchResult {
            id: Uuid::now_v7(),
            score: 0.5,
            payload: None,
        }
        .into();

        assert_eq!(scored.text, "");
        assert_eq!(scored.product_id, None);
    }
}
