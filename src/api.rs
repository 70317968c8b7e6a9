use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// Defines the endpoints that are not page navigations. None of them is gated:
/// the navigation guard only applies to page loads handled by the fallback, and
/// `/api/navigate` reports the guard's verdict without enforcing it.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /api/navigate?path=...
        // Evaluates the navigation guard for the given path and the caller's token.
        .route("/api/navigate", get(handlers::navigate))
        // GET /api/routes
        // Lists the route table with access flags.
        .route("/api/routes", get(handlers::list_routes))
}
