//! # Task Persistence
//!
//! The [`TaskStore`] seam between the service layer and storage, with a PostgreSQL
//! implementation ([`PgTaskStore`]) and an in-process one ([`InMemoryTaskStore`]).
//!
//! ## Ownership
//!
//! Every operation takes the caller's [`OwnerId`]. Single-item operations return
//! `Option`, and a record that exists but belongs to someone else is reported
//! exactly like a missing one.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use taskboard_core::config::ConfigManager;
//! use taskboard_core::database::{DatabaseConnection, PgTaskStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let connection = DatabaseConnection::connect(manager.config()).await?;
//! connection.run_migrations().await?;
//!
//! let store = PgTaskStore::new(connection.pool().clone());
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod postgres;

pub use connection::DatabaseConnection;
pub use memory::InMemoryTaskStore;
pub use postgres::PgTaskStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewTask, OwnerId, Task, TaskFields, TaskId, TaskStats};
use crate::query_builder::TaskQuery;

/// Storage failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Task store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt task row {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}

impl StoreError {
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable(reason.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations on per-owner task records
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Check the backing store is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Persist a new task; the store assigns id and timestamps
    async fn insert(&self, new_task: NewTask) -> StoreResult<Task>;

    async fn find(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>>;

    /// Tasks matching the plan, ordered and windowed
    async fn find_many(&self, query: &TaskQuery) -> StoreResult<Vec<Task>>;

    /// Number of tasks matching the plan, ignoring its window
    async fn count(&self, query: &TaskQuery) -> StoreResult<u64>;

    /// Replace the mutable fields of a task. `fields.completed == None` keeps the
    /// stored flag.
    async fn replace(
        &self,
        owner: OwnerId,
        id: TaskId,
        fields: TaskFields,
    ) -> StoreResult<Option<Task>>;

    async fn set_completed(
        &self,
        owner: OwnerId,
        id: TaskId,
        completed: bool,
    ) -> StoreResult<Option<Task>>;

    /// Remove a task, returning the removed record
    async fn delete(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>>;

    /// Remove every listed task the owner holds; returns how many were removed
    async fn delete_many(&self, owner: OwnerId, ids: &[TaskId]) -> StoreResult<u64>;

    /// Aggregate counts over one consistent snapshot of the owner's tasks
    async fn stats(&self, owner: OwnerId, now: DateTime<Utc>) -> StoreResult<TaskStats>;
}
