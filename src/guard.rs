use tracing::debug;

use crate::{
    auth::AuthStateProvider,
    routes::{ResolvedRoute, RouteMeta, RouteName, RouteTable},
};

/// Decision
///
/// The outcome of the access rule alone, before it is attached to a resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    RedirectTo(RouteName),
}

/// NavigationOutcome
///
/// What the hosting shell should do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Continue to the requested view.
    Proceed(ResolvedRoute),
    /// Abandon the request and navigate to the named route instead.
    RedirectTo(RouteName),
    /// No entry matches the requested path.
    NotFound,
}

/// decide
///
/// The access rule, evaluated in order:
/// 1. auth required and no token: redirect to `Login`;
/// 2. guest-only and a token is present: redirect to `Home`;
/// 3. otherwise proceed.
pub fn decide(meta: RouteMeta, is_authenticated: bool) -> Decision {
    if meta.requires_auth && !is_authenticated {
        Decision::RedirectTo(RouteName::Login)
    } else if meta.guest_only && is_authenticated {
        Decision::RedirectTo(RouteName::Home)
    } else {
        Decision::Proceed
    }
}

/// NavigationGuard
///
/// Runs before every navigation: resolves the requested path against the route table
/// and applies `decide` using the flag reported by the injected provider.
///
/// The guard holds no state of its own. The provider is consulted once per call to
/// `navigate` (and not at all for unmatched paths); neither the table nor the token
/// is modified.
pub struct NavigationGuard<'t, P> {
    table: &'t RouteTable,
    provider: P,
}

impl<'t, P: AuthStateProvider> NavigationGuard<'t, P> {
    pub fn new(table: &'t RouteTable, provider: P) -> Self {
        Self { table, provider }
    }

    /// navigate
    ///
    /// Decides the outcome of a request for `path`.
    pub fn navigate(&self, path: &str) -> NavigationOutcome {
        let Some(target) = self.table.resolve(path) else {
            debug!(path, "no route matches requested path");
            return NavigationOutcome::NotFound;
        };

        let is_authenticated = self.provider.is_authenticated();

        match decide(target.meta, is_authenticated) {
            Decision::Proceed => {
                debug!(path, route = %target.name, is_authenticated, "navigation allowed");
                NavigationOutcome::Proceed(target)
            }
            Decision::RedirectTo(name) => {
                debug!(path, route = %target.name, redirect = %name, is_authenticated, "navigation redirected");
                NavigationOutcome::RedirectTo(name)
            }
        }
    }
}
