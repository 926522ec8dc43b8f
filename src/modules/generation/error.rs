use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::common::response::ApiError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered with a non-2xx status. Body is passed through untouched.
    #[error("{body}")]
    Upstream { status: StatusCode, body: String },

    /// 2xx answer missing something we cannot proceed without.
    #[error("Bad gateway: {0}")]
    MalformedResponse(String),

    #[error("Generation failed for job set {job_set_id}")]
    JobFailed { job_set_id: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GenerationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GenerationError::Upstream { status, .. } => *status,
            GenerationError::MalformedResponse(_) | GenerationError::JobFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
            GenerationError::Network(_)
            | GenerationError::Decode(_)
            | GenerationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Generation request failed ({}): {}", status, self);
        }
        ApiError(self.to_string(), status).into_response()
    }
}
