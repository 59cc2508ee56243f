use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or_default, env_required};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CompletionProvider;
use crate::error::{ChatError, ChatResult};

/// Completion endpoint configuration (OpenRouter-compatible)
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Bound on the whole request; generation must not hang callers
    pub timeout_secs: u64,
    /// Optional HTTP-Referer attribution header
    pub referer: Option<String>,
}

impl FromEnv for CompletionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_required("OPENROUTER_API_KEY")?,
            base_url: env_or_default("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
            model: env_or_default("OPENROUTER_MODEL", "deepseek/deepseek-chat"),
            timeout_secs: env_parse_or_default("COMPLETION_TIMEOUT_SECS", 60)?,
            referer: std::env::var("OPENROUTER_REFERER").ok(),
        })
    }
}

/// Completion provider speaking the OpenRouter `/chat/completions` format
pub struct OpenRouterProvider {
    client: Client,
    config: CompletionConfig,
}

impl OpenRouterProvider {
    pub fn new(config: CompletionConfig) -> ChatResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> ChatResult<Self> {
        let config =
            CompletionConfig::from_env().map_err(|e| ChatError::Internal(e.to_string()))?;
        Self::new(config)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    /// First choice's reply text, the only field callers consume
    fn reply(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        context_block: &str,
        user_query: &str,
    ) -> ChatResult<String> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                RequestMessage {
                    role: "user",
                    content: crate::prompts::build_grounded_prompt(context_block, user_query),
                },
            ],
        };

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json");

        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer.clone());
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::UpstreamUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream { status, body });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|_| ChatError::MalformedResponse)?;

        parsed.reply().ok_or(ChatError::MalformedResponse)
    }
}
