use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Lookup miss or ownership mismatch - both surface identically so a
    /// guessed id leaks nothing
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Transport-level failure reaching the completion endpoint
    #[error("Completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Completion endpoint answered with a non-success status
    #[error("Completion service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Completion endpoint answered 2xx but without the expected reply field
    #[error("Completion response is missing the reply content")]
    MalformedResponse,

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ChatError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Session {} not found", id),
            ),
            ChatError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ChatError::UpstreamUnavailable(msg) => {
                tracing::error!("Completion transport failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_unavailable",
                    "Failed to contact the completion service".to_string(),
                )
            }
            // Upstream detail is surfaced for diagnostics (it never contains
            // credentials; only the response body is echoed)
            ChatError::Upstream { status, body } => {
                tracing::error!(upstream_status = status, "Completion service error: {}", body);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    format!("Completion service returned {}: {}", status, body),
                )
            }
            ChatError::MalformedResponse => {
                tracing::error!("Completion response missing reply content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_error",
                    "Completion service returned an unexpected response".to_string(),
                )
            }
            ChatError::Retrieval(msg) => {
                tracing::error!("Retrieval error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            ChatError::Store(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            ChatError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "type": error_type,
                    "message": message
                }
            })),
        )
            .into_response()
    }
}
