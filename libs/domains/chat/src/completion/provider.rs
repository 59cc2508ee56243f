use async_trait::async_trait;

use crate::error::ChatResult;

/// Trait for chat-completion providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Compose the fixed system instruction, the retrieved context block and
    /// the raw user query into a single request and return the reply text.
    ///
    /// Errors: `UpstreamUnavailable` on transport failure, `Upstream` on a
    /// non-2xx response, `MalformedResponse` when the reply field is absent.
    async fn complete(
        &self,
        system_prompt: &str,
        context_block: &str,
        user_query: &str,
    ) -> ChatResult<String>;
}
