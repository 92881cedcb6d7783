//! Video "generation".
//!
//! There is no video model behind this endpoint. The chat model is asked to
//! write a scene-by-scene description as if a video had been produced, and the
//! response says so in its `note`. Keep it that way until a real video API is
//! wired in.

use crate::api::{ChatCompletionRequest, ChatMessage, CompletionProvider};
use crate::models::proxy::required;
use crate::models::{PromptPayload, VideoConcept};
use crate::services::chat_service::CHAT_MODEL;
use crate::utils::ServiceError;

pub const DIRECTOR_PROMPT: &str = "You are a Valyn Core video director. Create an extremely detailed video production plan as if you're using Sora AI to generate it. Describe the video scene-by-scene with cinematography details, camera movements, lighting, sound design, and visual effects. Make it feel like a real video was created.";

pub const CONCEPT_NOTE: &str = "Video concept generated. Sora API integration pending public release.";

const CONCEPT_MAX_TOKENS: u32 = 500;

pub async fn generate_concept(
    provider: &dyn CompletionProvider,
    payload: PromptPayload,
) -> Result<VideoConcept, ServiceError> {
    let prompt = required(payload.prompt).ok_or(ServiceError::InvalidInput("Prompt is required"))?;

    let description = provider
        .chat_completion(ChatCompletionRequest {
            model: CHAT_MODEL.to_string(),
            messages: vec![
                ChatMessage::system(DIRECTOR_PROMPT),
                ChatMessage::user(format!(
                    "Create a detailed Sora-style video for: \"{}\". Describe it as if the video was actually generated, including all visual details, camera work, transitions, and effects.",
                    prompt
                )),
            ],
            max_tokens: CONCEPT_MAX_TOKENS,
            temperature: None,
        })
        .await
        .map_err(ServiceError::provider("Failed to generate video concept"))?;

    Ok(VideoConcept {
        description,
        prompt,
        note: CONCEPT_NOTE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockProvider;

    #[tokio::test]
    async fn test_concept_is_text_only() {
        let provider = MockProvider::default();
        let concept = generate_concept(&provider, PromptPayload { prompt: Some("sunrise over Tokyo".to_string()) })
            .await
            .unwrap();

        assert_eq!(concept.note, CONCEPT_NOTE);
        assert_eq!(concept.prompt, "sunrise over Tokyo");
        assert!(provider.image_requests.lock().unwrap().is_empty());
        assert_eq!(provider.last_chat().unwrap().max_tokens, 500);
    }
}
