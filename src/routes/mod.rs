//! Route Table Module
//!
//! Holds the application's navigation surface: every URL path pattern the SPA knows,
//! the logical name it resolves to, the view it mounts, and the access metadata the
//! navigation guard reads. The table is assembled once at startup and is read-only
//! afterwards.
//!
//! The entries are segregated by access class, mirroring how the guard treats them.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

/// Views that require a stored token (Home, VehicleDetail, Account).
pub mod authenticated;

/// Views that only make sense for anonymous visitors (Login, Register).
pub mod guest;

/// RouteName
///
/// The unique logical identifier of a route. Redirects always target a name,
/// never a raw path, so the concrete location is resolved through the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum RouteName {
    Home,
    Login,
    Register,
    VehicleDetail,
    Account,
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteName::Home => "Home",
            RouteName::Login => "Login",
            RouteName::Register => "Register",
            RouteName::VehicleDetail => "VehicleDetail",
            RouteName::Account => "Account",
        };
        f.write_str(name)
    }
}

/// RouteMeta
///
/// Access flags attached to a route. At most one of the two may be set;
/// a route with neither is reachable by everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub guest_only: bool,
}

impl RouteMeta {
    pub const fn requires_auth() -> Self {
        Self {
            requires_auth: true,
            guest_only: false,
        }
    }

    pub const fn guest_only() -> Self {
        Self {
            requires_auth: false,
            guest_only: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(&'static str),
    Param(&'static str),
}

/// RouteEntry
///
/// One row of the route table. The pattern is split into segments at construction
/// time; a segment starting with `:` captures exactly one non-empty path segment.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub name: RouteName,
    pub view: &'static str,
    pub meta: RouteMeta,
    segments: Vec<Segment>,
}

impl RouteEntry {
    pub fn new(pattern: &'static str, name: RouteName, view: &'static str, meta: RouteMeta) -> Self {
        let segments = pattern
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => Segment::Param(param),
                None => Segment::Static(segment),
            })
            .collect();

        Self {
            pattern,
            name,
            view,
            meta,
            segments,
        }
    }

    /// Names of the parameter segments, in pattern order.
    pub fn params(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(param) => Some(*param),
            Segment::Static(_) => None,
        })
    }

    fn matches(&self, segments: &[&str]) -> Option<BTreeMap<String, String>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in self.segments.iter().zip(segments) {
            match expected {
                Segment::Static(literal) if literal.eq_ignore_ascii_case(actual) => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if actual.is_empty() => return None,
                Segment::Param(param) => {
                    params.insert((*param).to_string(), decode_param(actual));
                }
            }
        }
        Some(params)
    }
}

/// ResolvedRoute
///
/// The result of matching a concrete path against the table: the entry's identity and
/// metadata plus the normalized path and captured parameters (`id=42` for `/vehicle/42`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: RouteName,
    pub pattern: &'static str,
    pub view: &'static str,
    pub meta: RouteMeta,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

/// RouteError
///
/// Failures raised while building the table or resolving a name back into a path.
/// Path resolution itself never fails; an unmatched path is simply `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route `{0}` is declared more than once")]
    DuplicateName(RouteName),
    #[error("route `{0}` cannot be both auth-only and guest-only")]
    ConflictingMeta(RouteName),
    #[error("route `{0}` is not in the table")]
    UnknownRoute(RouteName),
    #[error("route `{route}` needs a value for `:{param}`")]
    MissingParam { route: RouteName, param: &'static str },
}

/// RouteTable
///
/// Immutable, validated collection of route entries.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// new
    ///
    /// Validates and wraps a set of entries. Rejects duplicate names and entries that
    /// set both `requires_auth` and `guest_only`.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.meta.requires_auth && entry.meta.guest_only {
                return Err(RouteError::ConflictingMeta(entry.name));
            }
            if entries[..index].iter().any(|other| other.name == entry.name) {
                return Err(RouteError::DuplicateName(entry.name));
            }
        }

        Ok(Self { entries })
    }

    /// standard
    ///
    /// The GPS tracker's navigation surface:
    ///
    /// | Path           | Name          | Access        |
    /// |----------------|---------------|---------------|
    /// | `/`            | Home          | requires auth |
    /// | `/login`       | Login         | guest only    |
    /// | `/register`    | Register      | guest only    |
    /// | `/vehicle/:id` | VehicleDetail | requires auth |
    /// | `/account`     | Account       | requires auth |
    pub fn standard() -> Result<Self, RouteError> {
        let mut entries = authenticated::authenticated_routes();
        entries.extend(guest::guest_routes());
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn get(&self, name: RouteName) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// resolve
    ///
    /// Matches a requested path against the table. The query string, fragment and a
    /// single trailing slash are ignored, so `/account/` and `/account?tab=1` both resolve
    /// to `Account`; any other empty segment (`//account`, `/account//`) matches nothing.
    /// Static segments compare ASCII case-insensitively and captured parameters are
    /// percent-decoded (`/vehicle/a%20b` captures `id = "a b"`).
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let segments = split_path(path);

        self.entries.iter().find_map(|entry| {
            entry.matches(&segments).map(|params| ResolvedRoute {
                name: entry.name,
                pattern: entry.pattern,
                view: entry.view,
                meta: entry.meta,
                path: join_segments(&segments),
                params,
            })
        })
    }

    /// path_for
    ///
    /// Reverse resolution: builds the concrete path of a named route, substituting the
    /// supplied parameter values. Extra parameters are ignored.
    pub fn path_for(&self, name: RouteName, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let entry = self.get(name).ok_or(RouteError::UnknownRoute(name))?;

        let mut segments = Vec::with_capacity(entry.segments.len());
        for segment in &entry.segments {
            match segment {
                Segment::Static(literal) => segments.push(*literal),
                Segment::Param(param) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| key == param)
                        .map(|(_, value)| *value)
                        .filter(|value| !value.is_empty())
                        .ok_or(RouteError::MissingParam {
                            route: name,
                            param: *param,
                        })?;
                    segments.push(value);
                }
            }
        }

        Ok(join_segments(&segments))
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }

    // Inner empty segments are kept so they fail to match.
    path.strip_suffix('/').unwrap_or(path).split('/').collect()
}

// Malformed escapes are kept verbatim rather than rejecting the path.
fn decode_param(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn join_segments(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
