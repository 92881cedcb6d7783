use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single message in a chat completion conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for POST /chat/completions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    /// Left out of the body when unset so the provider default applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Full chat completion response from the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Request body for POST /images/generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

/// Response from the image generation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
}

/// Error envelope returned by the API: `{"error": {"message": ...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
}

/// Comprehensive error type for provider operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("400 Bad Request: {0}")]
    BadRequest(String),
    /// 401 Unauthorized
    #[error("401 Unauthorized: {0}")]
    Unauthorized(String),
    /// 403 Forbidden
    #[error("403 Forbidden: {0}")]
    Forbidden(String),
    /// 404 Not Found
    #[error("404 Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests
    #[error("429 Rate Limited: {0}")]
    RateLimited(String),
    /// 5xx Server Error
    #[error("{0} Server Error: {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("{0} HTTP Error: {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// The provider answered 2xx but without the expected payload
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}
