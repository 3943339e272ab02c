//! # Authentication Middleware
//!
//! Rejects unauthenticated requests with 401 before any task handler runs.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::web::auth::extract_token;
use crate::web::errors::ApiError;
use crate::web::state::AppState;

/// Authentication middleware for the task routes
///
/// On success the verified [`AuthenticatedUser`](crate::web::auth::AuthenticatedUser)
/// is inserted into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid authorization header format"))?;

    let token = extract_token(auth_str).map_err(|e| ApiError::unauthorized(e.to_string()))?;

    let user = state.verifier.verify(token).await.map_err(|e| {
        warn!(error = %e, "Token verification failed");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    debug!(owner_id = %user.owner_id, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
