use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type VectorResult<T> = Result<T, VectorError>;

impl From<qdrant_client::QdrantError> for VectorError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        VectorError::Qdrant(err.to_string())
    }
}

impl From<reqwest::Error> for VectorError {
    fn from(err: reqwest::Error) -> Self {
        VectorError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(err: serde_json::Error) -> Self {
        VectorError::Internal(format!("JSON error: {}", err))
    }
}

impl From<core_config::ConfigError> for VectorError {
    fn from(err: core_config::ConfigError) -> Self {
        VectorError::Config(err.to_string())
    }
}
