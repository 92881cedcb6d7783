use tracing::info;

use crate::api::{ChatCompletionRequest, ChatMessage, CompletionProvider, ImageGenerationRequest};
use crate::models::proxy::required;
use crate::models::{ImageResult, PromptPayload};
use crate::services::chat_service::CHAT_MODEL;
use crate::utils::ServiceError;

pub const IMAGE_MODEL: &str = "dall-e-2";
pub const IMAGE_SIZE: &str = "1024x1024";

pub const CRITIC_PROMPT: &str = "You are a Valyn Core AI art critic. Provide a detailed, engaging description of the image that was created. Be specific about visual elements, style, composition, and mood. Keep it concise (2-3 sentences).";

const CAPTION_MAX_TOKENS: u32 = 150;

/// Generate one image, then ask the chat model to describe it
pub async fn generate(
    provider: &dyn CompletionProvider,
    payload: PromptPayload,
) -> Result<ImageResult, ServiceError> {
    let prompt = required(payload.prompt).ok_or(ServiceError::InvalidInput("Prompt is required"))?;
    let on_failure = || ServiceError::provider("Failed to generate image");

    let image_url = provider
        .generate_image(ImageGenerationRequest {
            model: IMAGE_MODEL.to_string(),
            prompt: prompt.clone(),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        })
        .await
        .map_err(on_failure())?;

    info!("🎨 Image generated for prompt ({} chars)", prompt.len());

    let description = provider
        .chat_completion(ChatCompletionRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![
                ChatMessage::system(CRITIC_PROMPT),
                ChatMessage::user(format!(
                    "An image was generated with this prompt: \"{}\". Describe what was created in detail.",
                    prompt
                )),
            ],
            max_tokens: CAPTION_MAX_TOKENS,
            temperature: None,
        })
        .await
        .map_err(on_failure())?;

    Ok(ImageResult {
        image_url,
        description,
        prompt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockProvider;
    use crate::api::ApiError;

    #[tokio::test]
    async fn test_image_then_caption() {
        let provider = MockProvider::default();
        let result = generate(&provider, PromptPayload { prompt: Some("a neon city".to_string()) })
            .await
            .unwrap();

        assert_eq!(result.image_url, "https://images.example/generated.png");
        assert_eq!(result.prompt, "a neon city");
        assert!(result.description.contains("\"a neon city\""));

        let image = provider.image_requests.lock().unwrap()[0].clone();
        assert_eq!(image.model, "dall-e-2");
        assert_eq!(image.n, 1);
        assert_eq!(image.size, "1024x1024");

        let caption = provider.last_chat().unwrap();
        assert_eq!(caption.max_tokens, 150);
        assert!(caption.temperature.is_none());
    }

    #[tokio::test]
    async fn test_image_failure_skips_caption() {
        let provider = MockProvider::failing(ApiError::BadRequest("content policy".to_string()));
        let err = generate(&provider, PromptPayload { prompt: Some("x".to_string()) }).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate image: 400 Bad Request: content policy");
        assert!(provider.chat_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_caption_failure_fails_whole_request() {
        let provider = MockProvider::failing_chat(ApiError::ServerError(503, "overloaded".to_string()));
        let err = generate(&provider, PromptPayload { prompt: Some("a lighthouse".to_string()) })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to generate image: 503 Server Error: overloaded");
        assert_eq!(provider.image_requests.lock().unwrap().len(), 1);
        assert_eq!(provider.chat_requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_prompt() {
        let provider = MockProvider::default();
        assert!(generate(&provider, PromptPayload::default()).await.is_err());
        assert_eq!(provider.calls(), 0);
    }
}
