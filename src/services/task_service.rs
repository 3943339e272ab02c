use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::PaginationConfig;
use crate::database::{StoreError, TaskStore};
use crate::error::{Result, TaskboardError};
use crate::logging::{log_error, log_task_operation};
use crate::models::{NewTask, OwnerId, Task, TaskId, TaskStats};
use crate::query_builder::{
    build_task_query, FilterCriteria, PageInfo, Pagination, SortKey, TaskListParams,
};
use crate::validation::{
    apply_create_defaults, apply_update_defaults, validate_task_payload, StatusUpdate, TaskPayload,
};

/// One page of a filtered, sorted task list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPage {
    pub data: Vec<Task>,
    pub pagination: PageInfo,
}

/// Owner-scoped task operations over a [`TaskStore`]
///
/// The caller identity is an explicit argument on every method; nothing here reads
/// ambient request state.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    pagination: PaginationConfig,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService")
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Filtered, sorted, paginated list. Open tasks only unless `completed` says
    /// otherwise.
    pub async fn list_tasks(&self, owner: OwnerId, params: &TaskListParams) -> Result<TaskPage> {
        let criteria = FilterCriteria::from_params(params)?;
        let sort = SortKey::from_param(params.sort_by.as_deref());
        let pagination = Pagination::from_params(
            params.page.as_deref(),
            params.limit.as_deref(),
            &self.pagination,
        );
        let query = build_task_query(owner, &criteria, sort, Some(&pagination));

        let total = self
            .store
            .count(&query)
            .await
            .map_err(|e| store_failure("list_tasks", e))?;
        let data = self
            .store
            .find_many(&query)
            .await
            .map_err(|e| store_failure("list_tasks", e))?;

        debug!(
            owner_id = %owner,
            total = total,
            page = pagination.page(),
            returned = data.len(),
            sort = sort.as_str(),
            "Listed tasks"
        );

        Ok(TaskPage {
            data,
            pagination: pagination.page_info(total),
        })
    }

    /// Every task of the owner, open and completed, in the requested order
    pub async fn list_all_tasks(&self, owner: OwnerId, sort_by: Option<&str>) -> Result<Vec<Task>> {
        let query = build_task_query(
            owner,
            &FilterCriteria::default(),
            SortKey::from_param(sort_by),
            None,
        );
        self.store
            .find_many(&query)
            .await
            .map_err(|e| store_failure("list_all_tasks", e))
    }

    pub async fn task_stats(&self, owner: OwnerId) -> Result<TaskStats> {
        self.store
            .stats(owner, Utc::now())
            .await
            .map_err(|e| store_failure("task_stats", e))
    }

    pub async fn get_task(&self, owner: OwnerId, raw_id: &str) -> Result<Task> {
        let id = parse_task_id(raw_id)?;
        self.store
            .find(owner, id)
            .await
            .map_err(|e| store_failure("get_task", e))?
            .ok_or(TaskboardError::NotFound)
    }

    /// Validate and persist a new task. Nothing is stored when validation fails.
    pub async fn create_task(&self, owner: OwnerId, payload: TaskPayload) -> Result<Task> {
        let fields =
            validate_task_payload(&apply_create_defaults(payload)).map_err(TaskboardError::Validation)?;

        let task = self
            .store
            .insert(NewTask::new(owner, fields))
            .await
            .map_err(|e| store_failure("create_task", e))?;

        log_task_operation("create_task", owner, Some(task.id), "success", None);
        Ok(task)
    }

    /// Full replace of a task's mutable fields; an absent `completed` keeps the
    /// stored flag.
    pub async fn update_task(
        &self,
        owner: OwnerId,
        raw_id: &str,
        payload: TaskPayload,
    ) -> Result<Task> {
        let id = parse_task_id(raw_id)?;
        let fields =
            validate_task_payload(&apply_update_defaults(payload)).map_err(TaskboardError::Validation)?;

        let task = self
            .store
            .replace(owner, id, fields)
            .await
            .map_err(|e| store_failure("update_task", e))?
            .ok_or(TaskboardError::NotFound)?;

        log_task_operation("update_task", owner, Some(id), "success", None);
        Ok(task)
    }

    /// Toggle completion without running full validation
    pub async fn set_status(
        &self,
        owner: OwnerId,
        raw_id: &str,
        update: StatusUpdate,
    ) -> Result<Task> {
        let id = parse_task_id(raw_id)?;
        let task = self
            .store
            .set_completed(owner, id, update.completed)
            .await
            .map_err(|e| store_failure("set_status", e))?
            .ok_or(TaskboardError::NotFound)?;

        log_task_operation(
            "set_status",
            owner,
            Some(id),
            "success",
            Some(if update.completed { "completed" } else { "reopened" }),
        );
        Ok(task)
    }

    /// Delete one task, returning the removed record
    pub async fn delete_task(&self, owner: OwnerId, raw_id: &str) -> Result<Task> {
        let id = parse_task_id(raw_id)?;
        let task = self
            .store
            .delete(owner, id)
            .await
            .map_err(|e| store_failure("delete_task", e))?
            .ok_or(TaskboardError::NotFound)?;

        log_task_operation("delete_task", owner, Some(id), "success", None);
        Ok(task)
    }

    /// Delete every listed task the owner holds and report how many went.
    ///
    /// Malformed identifiers are skipped just like identifiers of other users' tasks.
    pub async fn bulk_delete(&self, owner: OwnerId, raw_ids: &[String]) -> Result<u64> {
        if raw_ids.is_empty() {
            return Err(TaskboardError::invalid_request(
                "taskIds must be a non-empty array",
            ));
        }

        let ids: Vec<TaskId> = raw_ids.iter().filter_map(|raw| TaskId::parse(raw)).collect();
        let skipped = raw_ids.len() - ids.len();

        let deleted = if ids.is_empty() {
            0
        } else {
            self.store
                .delete_many(owner, &ids)
                .await
                .map_err(|e| store_failure("bulk_delete", e))?
        };

        info!(
            owner_id = %owner,
            requested = raw_ids.len(),
            malformed = skipped,
            deleted = deleted,
            "Bulk delete finished"
        );
        Ok(deleted)
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::parse(raw).ok_or(TaskboardError::NotFound)
}

fn store_failure(operation: &str, error: StoreError) -> TaskboardError {
    log_error("task_service", operation, &error.to_string(), None);
    TaskboardError::Store(error)
}
