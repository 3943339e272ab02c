//! # Web API Middleware
//!
//! Authentication, request ids and the tower-http layers shared by every route.

pub mod auth;
pub mod request_id;

use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::WebConfig;
use crate::web::state::AppState;

/// Apply the middleware stack to a router with app state
///
/// Layers, outermost last:
/// 1. Request ID generation
/// 2. Request timeout
/// 3. CORS handling
/// 4. Tracing
pub fn apply_middleware_stack(router: Router<AppState>, web: &WebConfig) -> Router<AppState> {
    router
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(TimeoutLayer::new(web.request_timeout()))
        .layer(create_cors_layer(&web.cors.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer for the configured origins; an empty list allows any origin
fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
