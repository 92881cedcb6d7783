//! AI proxy, waitlist and health endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::SharedState;
use crate::models::{
    ChatPayload, ChatReply, HealthStatus, ImageResult, PromptPayload, RouterPayload, RouterReply,
    VideoConcept, WaitlistPayload, WaitlistResult,
};
use crate::services::{chat_service, image_service, video_service, waitlist_service};
use crate::utils::ServiceError;

pub const SERVICE_NAME: &str = "Valyn Core";

/// An unreadable body is handled like an empty one: the required field is missing
fn body_or_default<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    payload.map(|Json(body)| body).unwrap_or_default()
}

pub async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<ChatReply>, ServiceError> {
    chat_service::reply(state.provider.as_ref(), body_or_default(payload))
        .await
        .map(Json)
}

pub async fn router(
    State(state): State<SharedState>,
    payload: Result<Json<RouterPayload>, JsonRejection>,
) -> Result<Json<RouterReply>, ServiceError> {
    chat_service::route_prompt(state.provider.as_ref(), body_or_default(payload))
        .await
        .map(Json)
}

pub async fn generate_image(
    State(state): State<SharedState>,
    payload: Result<Json<PromptPayload>, JsonRejection>,
) -> Result<Json<ImageResult>, ServiceError> {
    image_service::generate(state.provider.as_ref(), body_or_default(payload))
        .await
        .map(Json)
}

pub async fn generate_video(
    State(state): State<SharedState>,
    payload: Result<Json<PromptPayload>, JsonRejection>,
) -> Result<Json<VideoConcept>, ServiceError> {
    video_service::generate_concept(state.provider.as_ref(), body_or_default(payload))
        .await
        .map(Json)
}

pub async fn waitlist(
    State(state): State<SharedState>,
    payload: Result<Json<WaitlistPayload>, JsonRejection>,
) -> Result<Json<WaitlistResult>, ServiceError> {
    waitlist_service::join(state.waitlist.as_ref(), body_or_default(payload)).map(Json)
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "online".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
