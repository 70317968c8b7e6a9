use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use utoipa::{IntoParams, ToSchema};

use crate::{
    guard::NavigationOutcome,
    routes::{RouteEntry, RouteError, RouteName, RouteTable},
};

// --- Response Schemas (Consumed by the SPA shell) ---

/// OutcomeKind
///
/// Discriminant of a navigation result, serialized in snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OutcomeKind {
    Proceed,
    Redirect,
    NotFound,
}

/// NavigationResponse
///
/// The guard's verdict in wire form.
/// - `proceed`: `route`, `view` and `params` describe the requested target; `location` is its normalized path.
/// - `redirect`: `route` names the redirect target and `location` is its path.
/// - `not_found`: every other field is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    pub outcome: OutcomeKind,
    pub route: Option<RouteName>,
    pub location: Option<String>,
    pub view: Option<String>,
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl NavigationResponse {
    /// from_outcome
    ///
    /// Converts a guard outcome into its wire form, resolving redirect targets to
    /// concrete paths through the route table.
    pub fn from_outcome(outcome: NavigationOutcome, table: &RouteTable) -> Result<Self, RouteError> {
        let response = match outcome {
            NavigationOutcome::Proceed(route) => Self {
                outcome: OutcomeKind::Proceed,
                route: Some(route.name),
                location: Some(route.path),
                view: Some(route.view.to_string()),
                params: route.params,
            },
            NavigationOutcome::RedirectTo(name) => Self {
                outcome: OutcomeKind::Redirect,
                route: Some(name),
                location: Some(table.path_for(name, &[])?),
                view: None,
                params: BTreeMap::new(),
            },
            NavigationOutcome::NotFound => Self {
                outcome: OutcomeKind::NotFound,
                route: None,
                location: None,
                view: None,
                params: BTreeMap::new(),
            },
        };
        Ok(response)
    }
}

/// RouteSummary
///
/// Public description of one route table entry (GET /api/routes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteSummary {
    #[schema(example = "/vehicle/:id")]
    pub path: String,
    pub name: RouteName,
    #[schema(example = "VehicleDetail")]
    pub view: String,
    pub requires_auth: bool,
    pub guest_only: bool,
}

impl From<&RouteEntry> for RouteSummary {
    fn from(entry: &RouteEntry) -> Self {
        Self {
            path: entry.pattern.to_string(),
            name: entry.name,
            view: entry.view.to_string(),
            requires_auth: entry.meta.requires_auth,
            guest_only: entry.meta.guest_only,
        }
    }
}

// --- Request Parameters ---

/// NavigateQuery
///
/// Query parameters for GET /api/navigate.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigateQuery {
    /// The path the user is trying to reach, e.g. `/vehicle/42`.
    pub path: String,
}
