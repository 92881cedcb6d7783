//! Outbound AI provider access

use async_trait::async_trait;

pub mod openai;

pub use openai::{ApiError, ChatCompletionRequest, ChatMessage, ImageGenerationRequest, OpenAiClient};

/// The seam between the proxy endpoints and the completion provider.
///
/// One outbound call per method, no retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run a chat completion and return the first choice's text
    async fn chat_completion(&self, request: ChatCompletionRequest) -> Result<String, ApiError>;

    /// Generate an image and return its URL
    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<String, ApiError>;
}
