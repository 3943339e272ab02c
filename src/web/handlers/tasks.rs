//! # Task Handlers
//!
//! Every handler runs behind `require_auth`, so the caller's [`AuthenticatedUser`]
//! is always present in the request extensions.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::constants::response_codes as codes;
use crate::models::{Task, TaskStats};
use crate::query_builder::TaskListParams;
use crate::validation::{FieldViolation, StatusUpdate, TaskPayload};
use crate::web::auth::AuthenticatedUser;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::response_types::{
    AllTasksParams, ApiResponse, BulkDeleteRequest, BulkDeleteResult,
};
use crate::web::state::AppState;

/// List tasks: GET /api/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    params: Result<Query<TaskListParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let Query(params) = params.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let page = state.task_service.list_tasks(user.owner_id, &params).await?;

    Ok(Json(
        ApiResponse::new(codes::TASKS_FETCHED, "Tasks fetched successfully", page.data)
            .with_pagination(page.pagination),
    ))
}

/// List every task, open and completed: GET /api/tasks/all
pub async fn list_all_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    params: Result<Query<AllTasksParams>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<Task>>>> {
    let Query(params) = params.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let tasks = state
        .task_service
        .list_all_tasks(user.owner_id, params.sort_by.as_deref())
        .await?;

    Ok(Json(ApiResponse::new(
        codes::TASKS_FETCHED,
        "All tasks fetched successfully",
        tasks,
    )))
}

/// Dashboard counters: GET /api/tasks/stats
pub async fn task_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<ApiResponse<TaskStats>>> {
    let stats = state.task_service.task_stats(user.owner_id).await?;
    Ok(Json(ApiResponse::new(
        codes::STATS_FETCHED,
        "Task statistics fetched successfully",
        stats,
    )))
}

/// Get one task: GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.task_service.get_task(user.owner_id, &id).await?;
    Ok(Json(ApiResponse::new(
        codes::TASK_FETCHED,
        "Task fetched successfully",
        task,
    )))
}

/// Create a task: POST /api/tasks
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Task>>)> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let task = state.task_service.create_task(user.owner_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            codes::TASK_CREATED,
            "Task created successfully",
            task,
        )),
    ))
}

/// Replace a task: PUT /api/tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let Json(payload) = payload.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let task = state
        .task_service
        .update_task(user.owner_id, &id, payload)
        .await?;

    Ok(Json(ApiResponse::new(
        codes::TASK_UPDATED,
        "Task updated successfully",
        task,
    )))
}

/// Toggle completion: PATCH /api/tasks/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let update = status_update_from(body)?;

    let task = state
        .task_service
        .set_status(user.owner_id, &id, update)
        .await?;

    Ok(Json(ApiResponse::new(
        codes::TASK_STATUS_UPDATED,
        "Task status updated successfully",
        task,
    )))
}

/// Delete a task: DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Task>>> {
    let task = state.task_service.delete_task(user.owner_id, &id).await?;
    Ok(Json(ApiResponse::new(
        codes::TASK_DELETED,
        "Task deleted successfully",
        task,
    )))
}

/// Delete several tasks: DELETE /api/tasks/bulk/delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<BulkDeleteResult>>> {
    let Json(body) = body.map_err(|e| ApiError::invalid_request(e.body_text()))?;
    let ids = task_ids_from(body.task_ids)?;

    let deleted_count = state.task_service.bulk_delete(user.owner_id, &ids).await?;
    Ok(Json(ApiResponse::new(
        codes::TASKS_DELETED,
        format!("{deleted_count} tasks deleted successfully"),
        BulkDeleteResult { deleted_count },
    )))
}

/// A well-formed body whose `completed` is missing or not a boolean is a field
/// violation; anything that is not JSON at all is a bad request.
fn status_update_from(body: Result<Json<StatusUpdate>, JsonRejection>) -> ApiResult<StatusUpdate> {
    match body {
        Ok(Json(update)) => Ok(update),
        Err(JsonRejection::JsonDataError(_)) => Err(ApiError::Validation(vec![
            FieldViolation::new("completed", "Completed must be a boolean"),
        ])),
        Err(rejection) => Err(ApiError::invalid_request(rejection.body_text())),
    }
}

/// Normalize the `taskIds` value to strings. Non-string entries are kept in their
/// JSON form; they will not parse as ids and are skipped by the service.
fn task_ids_from(raw: Option<Value>) -> ApiResult<Vec<String>> {
    let Some(Value::Array(items)) = raw else {
        return Err(ApiError::invalid_request("taskIds must be a non-empty array"));
    };

    let ids: Vec<String> = items
        .into_iter()
        .map(|item| match item {
            Value::String(id) => id,
            other => other.to_string(),
        })
        .collect();

    debug!(count = ids.len(), "Parsed bulk delete ids");
    Ok(ids)
}
