use tracing::info;

use crate::api::{ChatCompletionRequest, ChatMessage, CompletionProvider};
use crate::models::proxy::required;
use crate::models::{ChatPayload, ChatReply, RouterPayload, RouterReply};
use crate::utils::ServiceError;

pub const CHAT_MODEL: &str = "gpt-3.5-turbo";

pub const ASSISTANT_PROMPT: &str = "You are Valyn Core AI Assistant, an expert on the x402 protocol, blockchain payments, and the agent economy. You provide helpful, technical, and concise answers about x402, digital payments, blockchain technology, and how Valyn Core integrates with these systems. Keep responses professional and informative.";

pub const DEFAULT_ROUTER_PROMPT: &str = "You are a helpful AI assistant specialized in software development.";

const CHAT_MAX_TOKENS: u32 = 500;
const ROUTER_MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.7;

/// Answer a dashboard chat message as the Valyn Core assistant
pub async fn reply(
    provider: &dyn CompletionProvider,
    payload: ChatPayload,
) -> Result<ChatReply, ServiceError> {
    let message = required(payload.message).ok_or(ServiceError::InvalidInput("Message is required"))?;

    let request = ChatCompletionRequest {
        model: CHAT_MODEL.to_string(),
        messages: vec![ChatMessage::system(ASSISTANT_PROMPT), ChatMessage::user(message)],
        max_tokens: CHAT_MAX_TOKENS,
        temperature: Some(TEMPERATURE),
    };

    let reply = provider
        .chat_completion(request)
        .await
        .map_err(ServiceError::provider("Failed to get AI response"))?;

    info!("💬 Chat reply generated ({} chars)", reply.len());
    Ok(ChatReply { reply })
}

/// Forward a prompt with a caller-chosen system message
pub async fn route_prompt(
    provider: &dyn CompletionProvider,
    payload: RouterPayload,
) -> Result<RouterReply, ServiceError> {
    let prompt = required(payload.prompt).ok_or(ServiceError::InvalidInput("Prompt is required"))?;
    let system = required(payload.system_message).unwrap_or_else(|| DEFAULT_ROUTER_PROMPT.to_string());

    let request = ChatCompletionRequest {
        model: CHAT_MODEL.to_string(),
        messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
        max_tokens: ROUTER_MAX_TOKENS,
        temperature: Some(TEMPERATURE),
    };

    let response = provider
        .chat_completion(request)
        .await
        .map_err(ServiceError::provider("Failed to generate response"))?;

    Ok(RouterReply { response })
}
