//! Request and response bodies of the proxy endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterPayload {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub system_message: Option<String>,
}

/// Body shared by the image and video endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptPayload {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub image_url: String,
    pub description: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoConcept {
    pub description: String,
    pub prompt: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistResult {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// A required field counts as present only when it is a non-empty string
pub fn required(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
