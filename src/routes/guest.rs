use super::{RouteEntry, RouteMeta, RouteName};

/// Guest Route Set
///
/// Defines the entry points for visitors without a stored token. A visitor who is
/// already signed in is sent to `Home` instead of seeing these views again.
pub fn guest_routes() -> Vec<RouteEntry> {
    vec![
        // GET /login
        RouteEntry::new("/login", RouteName::Login, "Login", RouteMeta::guest_only()),
        // GET /register
        RouteEntry::new(
            "/register",
            RouteName::Register,
            "Register",
            RouteMeta::guest_only(),
        ),
    ]
}
