#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Taskboard Core
//!
//! Task list query, aggregation and validation service behind the Taskboard to-do
//! application.
//!
//! ## Overview
//!
//! Each authenticated user owns a set of tasks. The crate answers filtered, sorted,
//! paginated list queries over them, computes dashboard statistics, validates writes
//! and exposes everything as a small REST API.
//!
//! ## Module Organization
//!
//! - [`models`] - Task records, categories, priorities and owner/task ids
//! - [`validation`] - Field rules for task writes, reporting every violation at once
//! - [`query_builder`] - Filter, sort and pagination plans for list requests
//! - [`database`] - The [`database::TaskStore`] seam with PostgreSQL and in-memory stores
//! - [`services`] - Owner-scoped task operations
//! - [`web`] - axum routes, auth middleware and response envelopes
//! - [`config`] - YAML configuration with per-environment overrides
//! - [`logging`] - Structured logging setup
//! - [`error`] - Service-level error type
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use taskboard_core::config::PaginationConfig;
//! use taskboard_core::database::InMemoryTaskStore;
//! use taskboard_core::models::OwnerId;
//! use taskboard_core::services::TaskService;
//! use taskboard_core::validation::TaskPayload;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TaskService::new(Arc::new(InMemoryTaskStore::new()), PaginationConfig::default());
//! let owner = OwnerId(uuid::Uuid::new_v4());
//!
//! let payload: TaskPayload = serde_json::from_value(serde_json::json!({"title": "Buy milk"}))?;
//! let task = service.create_task(owner, payload).await?;
//!
//! let stats = service.task_stats(owner).await?;
//! assert_eq!(stats.total, 1);
//! assert_eq!(task.title, "Buy milk");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod query_builder;
pub mod services;
pub mod utils;
pub mod validation;
pub mod web;

pub use config::{ConfigManager, TaskboardConfig};
pub use database::{InMemoryTaskStore, PgTaskStore, StoreError, TaskStore};
pub use error::{Result, TaskboardError};
pub use models::{Category, OwnerId, Priority, Task, TaskId, TaskStats};
pub use services::{TaskPage, TaskService};
pub use web::{create_app, AppState};
