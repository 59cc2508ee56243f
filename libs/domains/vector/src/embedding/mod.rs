mod openai;
mod provider;

pub use openai::{EmbeddingConfig, OpenAIProvider};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
