use thiserror::Error;

use crate::database::StoreError;
use crate::query_builder::QueryParamError;
use crate::validation::FieldViolation;

/// Service-level failures, each mapping to one response category
#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Task not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TaskboardError {
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl From<QueryParamError> for TaskboardError {
    fn from(error: QueryParamError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_convert() {
        let error: TaskboardError = StoreError::unavailable("pool closed").into();
        assert!(matches!(error, TaskboardError::Store(_)));
        assert_eq!(error.to_string(), "Task store unavailable: pool closed");
    }

    #[test]
    fn test_query_param_errors_become_invalid_requests() {
        let error: TaskboardError = QueryParamError {
            param: "category",
            message: "unknown value 'chores'".to_string(),
        }
        .into();
        assert!(matches!(error, TaskboardError::InvalidRequest(_)));
    }
}
