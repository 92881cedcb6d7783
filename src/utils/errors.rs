use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::ApiError;

/// Failure taxonomy of the HTTP endpoints
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or unusable input; the message is shown to the caller as-is
    #[error("{0}")]
    InvalidInput(&'static str),
    /// The AI provider call failed; its message is passed on as `details`
    #[error("{context}: {source}")]
    Provider {
        context: &'static str,
        #[source]
        source: ApiError,
    },
    /// Anything else that went wrong on our side
    #[error("{context}: {details}")]
    Internal {
        context: &'static str,
        details: String,
    },
}

impl ServiceError {
    /// Wrap a provider error under a fixed, endpoint-specific message
    pub fn provider(context: &'static str) -> impl FnOnce(ApiError) -> ServiceError {
        move |source| ServiceError::Provider { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Provider { .. } | ServiceError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServiceError::InvalidInput(message) => {
                warn!("Rejected request: {}", message);
                json!({ "error": message })
            }
            ServiceError::Provider { context, source } => {
                error!("Provider error ({}): {}", context, source);
                json!({ "error": context, "details": source.to_string() })
            }
            ServiceError::Internal { context, details } => {
                error!("{}: {}", context, details);
                json!({ "error": context })
            }
        };

        (status, Json(body)).into_response()
    }
}
