//! Structured error response payloads.
//!
//! Domain error enums implement `IntoResponse` themselves; this module only
//! provides the shared wire shape and the router-level fallback handlers.

pub mod handlers;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error payload returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. "not_found"
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Optional structured detail (validation errors, upstream body, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
