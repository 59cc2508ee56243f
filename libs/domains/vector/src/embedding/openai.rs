use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::EmbeddingProvider;
use crate::error::{VectorError, VectorResult};

/// OpenAI-compatible embedding endpoint configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl FromEnv for EmbeddingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("EMBEDDING_API_KEY")?,
            base_url: env_or_default("EMBEDDING_BASE_URL", "https://api.openai.com/v1"),
            model: env_or_default("EMBEDDING_MODEL", "text-embedding-3-small"),
        })
    }
}

/// Embeddings provider speaking the OpenAI `/embeddings` wire format
pub struct OpenAIProvider {
    client: Client,
    config: EmbeddingConfig,
}

impl OpenAIProvider {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> VectorResult<Self> {
        Ok(Self::new(EmbeddingConfig::from_env()?))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    async fn embed(&self, text: &str) -> VectorResult<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| VectorError::Embedding("No embedding returned".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> VectorResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: self.config.model.clone(),
            input: texts.to_vec(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VectorError::Embedding(format!(
                "Embedding API error ({}): {}",
                status, error_text
            )));
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| VectorError::Embedding(format!("Malformed embedding response: {}", e)))?;

        // Sort by index to maintain input order
        let mut data = embedding_response.data;
        data.sort_by_key(|d| d.index);

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_preserves_input_order() {
        // The API may return entries out of order; `index` is authoritative
        let raw = r#"{
            "data": [
                {"embedding": [0.2, 0.2], "index": 1},
                {"embedding": [0.1, 0.1], "index": 0}
            ],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        }"#;

        let mut parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        parsed.data.sort_by_key(|d| d.index);

        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.1]);
        assert_eq!(parsed.data[1].embedding, vec![0.2, 0.2]);
    }
}
