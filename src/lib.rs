use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    LatencyUnit,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core navigation components.
pub mod auth;
pub mod guard;
pub mod routes;

// HTTP surface hosting the guard.
pub mod api;
pub mod config;
pub mod handlers;
pub mod models;

// --- Public Re-exports ---

pub use auth::{AuthStateProvider, MemoryTokenStore, StoredToken, TokenStore};
pub use config::AppConfig;
pub use guard::{NavigationGuard, NavigationOutcome};
pub use routes::{RouteName, RouteTable};

/// ApiDoc
///
/// OpenAPI description of the HTTP surface, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::navigate, handlers::list_routes),
    components(
        schemas(
            models::NavigationResponse, models::OutcomeKind, models::RouteSummary,
            routes::RouteName,
        )
    ),
    tags(
        (name = "gps-tracker-nav", description = "GPS tracker navigation guard")
    )
)]
struct ApiDoc;

/// RouteTableState
///
/// The route table shared across requests. Built once at startup, never mutated.
pub type RouteTableState = Arc<RouteTable>;

/// AppState
///
/// The single immutable container shared by all requests.
#[derive(Clone)]
pub struct AppState {
    /// The validated route table.
    pub routes: RouteTableState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

impl AppState {
    /// Builds the state around the standard route table.
    pub fn new(config: AppConfig) -> Result<Self, routes::RouteError> {
        Ok(Self {
            routes: Arc::new(RouteTable::standard()?),
            config,
        })
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RouteTableState {
    fn from_ref(app_state: &AppState) -> RouteTableState {
        app_state.routes.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the HTTP surface: API routes, Swagger UI, and the page-navigation
/// fallback that runs the guard, wrapped in the request-id, tracing and CORS layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api::api_routes())
        // Every other path is a page load subject to the navigation guard.
        .fallback(handlers::page_navigation)
        .with_state(state);

    // 3. Navigation Tracing
    // One INFO line per page load or verdict request, with its latency, inside the
    // span opened by `trace_span_logger`.
    let navigation_trace = TraceLayer::new_for_http()
        .make_span_with(trace_span_logger)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    // 4. Layer Order: the id is assigned before the span opens and echoed on the way
    // out, so redirects and 404s carry it too. CORS stays outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(navigation_trace)
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Opens the per-request span, tagged with the `x-request-id` set by the layer above
/// so every log line of one navigation can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
