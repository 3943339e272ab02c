//! # Task Query Builder
//!
//! Translates a list request (owner + filter criteria + sort key + page window) into an
//! owner-scoped query plan.
//!
//! ## Key Components
//!
//! - [`filter`] - Raw list parameters and typed [`FilterCriteria`]
//! - [`conditions`] - Individual filter clauses, evaluable in memory and as SQL
//! - [`sort`] - [`SortKey`] orderings (open tasks always first)
//! - [`pagination`] - Page coercion, skip/limit and total page computation
//! - [`builder`] - [`TaskQuery`] plans and their PostgreSQL rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use taskboard_core::config::PaginationConfig;
//! use taskboard_core::models::OwnerId;
//! use taskboard_core::query_builder::{
//!     build_task_query, FilterCriteria, Pagination, SortKey, TaskListParams,
//! };
//!
//! let params = TaskListParams {
//!     category: Some("work".to_string()),
//!     sort_by: Some("priority".to_string()),
//!     ..TaskListParams::default()
//! };
//! let criteria = FilterCriteria::from_params(&params).unwrap();
//! let pagination = Pagination::from_params(None, None, &PaginationConfig::default());
//! let owner = OwnerId(uuid::Uuid::new_v4());
//!
//! let query = build_task_query(owner, &criteria, SortKey::Priority, Some(&pagination));
//! assert!(query.build_select().sql().contains("category = $2"));
//! ```
//!
//! Building a plan has no side effects; executing it is the store's job.

pub mod builder;
pub mod conditions;
pub mod filter;
pub mod pagination;
pub mod sort;

pub use builder::{build_task_query, TaskQuery, TaskQueryBuilder, Window, TASK_COLUMNS};
pub use conditions::Condition;
pub use filter::{FilterCriteria, QueryParamError, TaskListParams};
pub use pagination::{PageInfo, Pagination};
pub use sort::SortKey;
