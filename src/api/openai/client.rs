use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::models::{
    ApiError, ChatCompletionRequest, ChatCompletionResponse, ErrorResponse,
    ImageGenerationRequest, ImageGenerationResponse,
};
use crate::api::CompletionProvider;

/// OpenAI REST client used by the proxy endpoints
pub struct OpenAiClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Create a new client against the public API
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (proxies, testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create default headers with authorization
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Map a non-success response to an `ApiError`, preferring the provider's own message
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let body_text = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body_text);

        match status.as_u16() {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            429 => {
                warn!("Provider rate limited the request: {}", message);
                ApiError::RateLimited(message)
            }
            code @ 500..=599 => {
                warn!("Provider server error {}: {}", code, message);
                ApiError::ServerError(code, message)
            }
            code => ApiError::HttpError(code, message),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.create_headers()?;

        debug!("POST {}", url);

        let response = self.http_client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    /// POST /chat/completions
    ///
    /// Returns the content of the first choice.
    async fn chat_completion(&self, request: ChatCompletionRequest) -> Result<String, ApiError> {
        let response: ChatCompletionResponse = self.post_json("/chat/completions", &request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ApiError::EmptyResponse("completion returned no choices".to_string()))
    }

    /// POST /images/generations
    ///
    /// Returns the URL of the first generated image.
    async fn generate_image(&self, request: ImageGenerationRequest) -> Result<String, ApiError> {
        let response: ImageGenerationResponse = self.post_json("/images/generations", &request).await?;

        response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| ApiError::EmptyResponse("image generation returned no url".to_string()))
    }
}

/// Pull `error.message` out of a provider error body, falling back to the raw text
pub fn extract_error_message(body_text: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body_text) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body_text.trim().is_empty() => "no response body".to_string(),
        Err(_) => body_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_envelope() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":null}}"#;
        assert_eq!(extract_error_message(body), "You exceeded your current quota");
    }

    #[test]
    fn test_extract_error_message_falls_back_to_body() {
        assert_eq!(extract_error_message("upstream timeout"), "upstream timeout");
        assert_eq!(extract_error_message("   "), "no response body");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OpenAiClient::with_base_url("sk-test".to_string(), "http://localhost:9999/v1/".to_string());
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let client = OpenAiClient::new("sk-test".to_string());
        let headers = client.create_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
    }
}
