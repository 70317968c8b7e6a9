use crate::{
    AppState, RouteTableState,
    auth::RequestAuth,
    guard::{NavigationGuard, NavigationOutcome},
    models::{NavigateQuery, NavigationResponse, OutcomeKind, RouteSummary},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};

// --- Handlers ---

/// navigate
///
/// [Public Route] Asks the navigation guard what should happen if the current visitor
/// tried to open `path`. Always answers 200 with the verdict; it never redirects itself,
/// so an SPA shell can call it before changing its own history.
///
/// *Note*: The visitor's token is read from the request (cookie or Bearer header) by the
/// `RequestAuth` extractor.
#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Navigation verdict", body = NavigationResponse),
        (status = 500, description = "Redirect target missing from the route table")
    )
)]
pub async fn navigate(
    auth: RequestAuth,
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> Result<Json<NavigationResponse>, StatusCode> {
    let outcome = NavigationGuard::new(&state.routes, auth).navigate(&query.path);
    to_response(outcome, &state).map(Json)
}

/// list_routes
///
/// [Public Route] Lists the route table: every path pattern with its name, view and
/// access flags. The table is static, so the response is the same for every visitor.
#[utoipa::path(
    get,
    path = "/api/routes",
    responses((status = 200, description = "Route table", body = [RouteSummary]))
)]
pub async fn list_routes(State(routes): State<RouteTableState>) -> Json<Vec<RouteSummary>> {
    Json(routes.entries().iter().map(RouteSummary::from).collect())
}

/// page_navigation
///
/// Fallback for every path not claimed by the API: treats the request as a history-mode
/// page load and applies the navigation guard to it.
///
/// - Proceed: 200 with the `NavigationResponse` for the target view.
/// - Redirect: 303 See Other, `Location` set to the redirect target's path.
/// - Unknown path: 404 with a `not_found` body.
pub async fn page_navigation(
    method: Method,
    uri: Uri,
    auth: RequestAuth,
    State(state): State<AppState>,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let outcome = NavigationGuard::new(&state.routes, auth).navigate(uri.path());
    let response = match to_response(outcome, &state) {
        Ok(response) => response,
        Err(status) => return status.into_response(),
    };

    match (response.outcome, response.location.as_deref()) {
        (OutcomeKind::Redirect, Some(location)) => Redirect::to(location).into_response(),
        (OutcomeKind::NotFound, _) => (StatusCode::NOT_FOUND, Json(response)).into_response(),
        _ => Json(response).into_response(),
    }
}

fn to_response(outcome: NavigationOutcome, state: &AppState) -> Result<NavigationResponse, StatusCode> {
    NavigationResponse::from_outcome(outcome, &state.routes).map_err(|e| {
        tracing::error!(error = %e, "cannot resolve navigation target");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
