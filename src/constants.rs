//! # System Constants
//!
//! Defaults and limits shared by the query engine, validator and web layer.

/// Pagination defaults
pub mod pagination {
    /// First page; pages are 1-indexed
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when `limit` is missing or invalid
    pub const DEFAULT_LIMIT: u32 = 10;
    /// Upper bound applied to caller supplied page sizes
    pub const MAX_LIMIT: u32 = 100;
}

/// Field rules for task writes
pub mod validation {
    /// Minimum title length, counted in characters after trimming
    pub const MIN_TITLE_LENGTH: usize = 3;
    /// Maximum description length in characters
    pub const MAX_DESCRIPTION_LENGTH: usize = 500;
}

/// Response codes carried in every API envelope
pub mod response_codes {
    pub const TASKS_FETCHED: &str = "TASKS_FETCHED";
    pub const TASK_FETCHED: &str = "TASK_FETCHED";
    pub const STATS_FETCHED: &str = "STATS_FETCHED";
    pub const TASK_CREATED: &str = "TASK_CREATED";
    pub const TASK_UPDATED: &str = "TASK_UPDATED";
    pub const TASK_STATUS_UPDATED: &str = "TASK_STATUS_UPDATED";
    pub const TASK_DELETED: &str = "TASK_DELETED";
    pub const TASKS_DELETED: &str = "TASKS_DELETED";

    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const TASK_NOT_FOUND: &str = "TASK_NOT_FOUND";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const SERVICE_UNAVAILABLE: &str = "SERVICE_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Name of the task table
pub const TASKS_TABLE: &str = "taskboard_tasks";
