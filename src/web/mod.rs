//! # Taskboard REST API
//!
//! axum application exposing the task endpoints under `/api/tasks` and the public
//! health probes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_core::config::ConfigManager;
//! use taskboard_core::database::InMemoryTaskStore;
//! use taskboard_core::web::{create_app, AppState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let state = AppState::from_config(&manager, Arc::new(InMemoryTaskStore::new()))?;
//! let app = create_app(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::Router;

pub use auth::{AuthError, AuthenticatedUser, IdentityVerifier, JwtVerifier};
pub use errors::{ApiError, ApiResult};
pub use state::AppState;

/// Create the web application with all routes and middleware
pub fn create_app(app_state: AppState) -> Router {
    let protected_routes = routes::task_routes().layer(axum::middleware::from_fn_with_state(
        app_state.clone(),
        middleware::auth::require_auth,
    ));

    let router = Router::new()
        .merge(routes::health_routes())
        .merge(protected_routes);

    middleware::apply_middleware_stack(router, &app_state.config.web).with_state(app_state)
}
