//! Web API route definitions, grouped by functionality.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Health check routes for monitoring probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
}

/// Owner-scoped task routes. Callers must wrap these in the auth middleware.
///
/// The literal segments (`all`, `stats`, `bulk/delete`) take precedence over `{id}`.
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route("/api/tasks/all", get(handlers::tasks::list_all_tasks))
        .route("/api/tasks/stats", get(handlers::tasks::task_stats))
        .route("/api/tasks/bulk/delete", delete(handlers::tasks::bulk_delete))
        .route(
            "/api/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/api/tasks/{id}/status", patch(handlers::tasks::update_status))
}
