//! # Web API Error Types
//!
//! Every failure leaves the API as a `{ code, message, errors? }` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::error;

use crate::constants::response_codes as codes;
use crate::error::TaskboardError;
use crate::validation::FieldViolation;
use crate::web::response_types::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Task not found")]
    NotFound,

    #[error("{message}")]
    InvalidRequest { message: String },

    #[error("Authentication required")]
    Unauthorized { reason: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => codes::VALIDATION_ERROR,
            Self::NotFound => codes::TASK_NOT_FOUND,
            Self::InvalidRequest { .. } => codes::INVALID_REQUEST,
            Self::Unauthorized { .. } => codes::UNAUTHORIZED,
            Self::ServiceUnavailable => codes::SERVICE_UNAVAILABLE,
            Self::Internal => codes::INTERNAL_ERROR,
        }
    }
}

impl From<TaskboardError> for ApiError {
    fn from(error: TaskboardError) -> Self {
        match error {
            TaskboardError::Validation(violations) => Self::Validation(violations),
            TaskboardError::NotFound => Self::NotFound,
            TaskboardError::InvalidRequest(message) => Self::InvalidRequest { message },
            // Already logged with context by the service; callers only see an opaque error.
            TaskboardError::Store(_) => Self::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), status = %status, "Request failed");
        }

        let message = match &self {
            Self::Unauthorized { reason } if !reason.is_empty() => {
                format!("Authentication required: {reason}")
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message,
            errors: match self {
                Self::Validation(violations) => violations,
                _ => Vec::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
