//! Application error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::engine::{EngineError, TOOL, TOOL_VERSION};

/// Errors surfaced to API callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input rejected before it reached the decision core.
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!("request rejected: {}", self);
        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "tool": TOOL,
            "tool_version": TOOL_VERSION,
        }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
