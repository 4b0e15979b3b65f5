use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use common::ErrorResponse;
use compute::ComputeError;
use thiserror::Error;
use tracing::error;

use crate::llm::LlmError;

/// Error returned by the API handlers.
///
/// Every variant is rendered as an [`ErrorResponse`] body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// No language model configured
    #[error("{0}")]
    LlmUnavailable(String),

    /// The language model call failed
    #[error("{0}")]
    LlmFailed(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::LlmUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::LlmFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::LlmUnavailable(_) => "LLM_UNAVAILABLE",
            ApiError::LlmFailed(_) => "LLM_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }
        let body = ErrorResponse::new(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

impl From<ComputeError> for ApiError {
    fn from(error: ComputeError) -> Self {
        match error {
            ComputeError::NoData { .. } => ApiError::NotFound(error.to_string()),
            ComputeError::Dataset(_) => ApiError::Internal(error.to_string()),
            _ if error.is_invalid_input() => ApiError::BadRequest(error.to_string()),
            _ => ApiError::Internal(error.to_string()),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(error: LlmError) -> Self {
        match error {
            LlmError::NotConfigured => ApiError::LlmUnavailable(error.to_string()),
            _ => ApiError::LlmFailed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::BloodType;

    #[test]
    fn test_compute_errors_map_to_status() {
        let unknown = ApiError::from(ComputeError::UnknownRegion {
            region: "평양".to_string(),
            valid: "부산".to_string(),
        });
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let month = ApiError::from(ComputeError::InvalidMonth(5));
        assert_eq!(month.status(), StatusCode::BAD_REQUEST);
        assert_eq!(month.to_string(), "Month must be 1, 2, or 3 (got 5)");

        let missing = ApiError::from(ComputeError::NoData {
            region: "부산".to_string(),
            blood_type: BloodType::O,
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_llm_errors_map_to_status() {
        assert_eq!(
            ApiError::from(LlmError::NotConfigured).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(LlmError::Status {
                status: 429,
                body: "rate limited".to_string()
            })
            .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
