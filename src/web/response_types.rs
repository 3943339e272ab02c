//! # Response Envelopes
//!
//! Every response carries a machine-readable `code` and a human `message`.

use serde::{Deserialize, Serialize};

use crate::query_builder::PageInfo;
use crate::validation::FieldViolation;

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: String,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: &str, message: impl Into<String>, data: T) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PageInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

/// Bulk delete body: `{ "taskIds": [...] }`.
///
/// The list is kept as raw JSON so a missing or non-array value is reported as an
/// invalid request instead of a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteRequest {
    #[serde(rename = "taskIds", default)]
    pub task_ids: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// `GET /api/tasks/all` parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllTasksParams {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
