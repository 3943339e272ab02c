//! # Health Check Handlers
//!
//! Public probes; neither requires authentication.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use crate::web::errors::ApiError;
use crate::web::response_types::HealthResponse;
use crate::web::state::AppState;

/// Basic health check endpoint: GET /health
///
/// Returns OK whenever the process is serving requests.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy"))
}

/// Readiness probe: GET /health/ready
///
/// Ready only when the task store answers.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), ApiError> {
    match state.task_service.store().ping().await {
        Ok(()) => Ok((StatusCode::OK, Json(HealthResponse::new("ready")))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            Err(ApiError::ServiceUnavailable)
        }
    }
}
