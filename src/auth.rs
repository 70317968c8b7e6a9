use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use std::{collections::HashMap, convert::Infallible, sync::Arc, sync::RwLock};

use crate::config::AppConfig;

/// The well-known key the SPA persists its session token under.
pub const TOKEN_KEY: &str = "token";

// 1. TokenStore Contract
/// TokenStore
///
/// Read access to a persisted key–value store (browser local storage, a cookie jar,
/// an in-memory map in tests). Only lookups are needed: the navigation guard never
/// writes the token.
///
/// A failed read is reported as `None`; callers cannot tell it apart from an absent key.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

// 2. AuthStateProvider Contract
/// AuthStateProvider
///
/// The injected source of the authentication flag. The guard calls it once per
/// navigation and never caches the answer.
pub trait AuthStateProvider {
    fn is_authenticated(&self) -> bool;
}

impl AuthStateProvider for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}

impl<P: AuthStateProvider + ?Sized> AuthStateProvider for &P {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

/// StoredToken
///
/// The standard provider: authenticated iff the store holds a non-empty value under `key`.
/// The token itself is opaque; it is neither decoded nor validated here.
#[derive(Debug, Clone)]
pub struct StoredToken<S> {
    store: S,
    key: String,
}

impl<S: TokenStore> StoredToken<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Provider reading the default `token` key.
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, TOKEN_KEY)
    }
}

impl<S: TokenStore> AuthStateProvider for StoredToken<S> {
    fn is_authenticated(&self) -> bool {
        self.store
            .get(&self.key)
            .is_some_and(|token| !token.is_empty())
    }
}

// 3. In-Memory Implementation
/// MemoryTokenStore
///
/// A process-local store, standing in for browser storage in tests and in hosts that
/// keep the session themselves. A poisoned lock reads as an empty store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that already holds a session token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(TOKEN_KEY, token);
        store
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries
            .write()
            .ok()
            .and_then(|mut entries| entries.remove(key))
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

// 4. HTTP Implementation
/// RequestTokenStore
///
/// Exposes the credentials carried by a single HTTP request as a token store:
/// cookies are looked up by name, and an `Authorization: Bearer <token>` header
/// answers for any key (the SPA sends the same token it keeps in local storage).
/// Cookies take precedence over the bearer header.
#[derive(Debug, Clone, Default)]
pub struct RequestTokenStore {
    cookies: HashMap<String, String>,
    bearer: Option<String>,
}

impl RequestTokenStore {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let cookies = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                Some((name.trim().to_string(), value.trim().to_string()))
            })
            .collect();

        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());

        Self { cookies, bearer }
    }
}

impl TokenStore for RequestTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies
            .get(key)
            .filter(|value| !value.is_empty())
            .or(self.bearer.as_ref())
            .cloned()
    }
}

/// RequestAuth Extractor Result
///
/// The authentication-state provider for one HTTP request, keyed by the configured
/// token name. Handlers hand it straight to the `NavigationGuard`.
#[derive(Debug, Clone)]
pub struct RequestAuth(pub StoredToken<RequestTokenStore>);

impl AuthStateProvider for RequestAuth {
    fn is_authenticated(&self) -> bool {
        self.0.is_authenticated()
    }
}

/// RequestAuth Extractor Implementation
///
/// Never rejects: a missing, malformed or non-UTF-8 credential header simply leaves
/// the request unauthenticated, and the guard turns that into a redirect.
impl<S> FromRequestParts<S> for RequestAuth
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let store = RequestTokenStore::from_headers(&parts.headers);

        Ok(RequestAuth(StoredToken::new(store, config.token_key)))
    }
}
