use super::{RouteEntry, RouteMeta, RouteName};

/// Authenticated Route Set
///
/// Defines the views reachable only while a token is present in the token store.
/// The navigation guard redirects anonymous visitors on any of these paths to `Login`.
///
/// Access Control Strategy:
/// Every entry here carries `requires_auth`. Nothing in this set may also be marked
/// guest-only; `RouteTable::new` rejects such an entry at startup.
pub fn authenticated_routes() -> Vec<RouteEntry> {
    vec![
        // GET /
        // Dashboard listing the user's tracked vehicles and their last known positions.
        RouteEntry::new("/", RouteName::Home, "Home", RouteMeta::requires_auth()),
        // GET /vehicle/:id
        // Detail view of a single vehicle: live position and movement history.
        RouteEntry::new(
            "/vehicle/:id",
            RouteName::VehicleDetail,
            "VehicleDetail",
            RouteMeta::requires_auth(),
        ),
        // GET /account
        // Profile and account settings of the signed-in user.
        RouteEntry::new(
            "/account",
            RouteName::Account,
            "Account",
            RouteMeta::requires_auth(),
        ),
    ]
}
