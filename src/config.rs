use std::{env, net::SocketAddr};

use crate::auth::TOKEN_KEY;

/// Address the server binds when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the application's configuration. Immutable once loaded and pulled into
/// handlers and extractors via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format.
    pub env: Env,
    // Socket address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    // Name under which the session token is stored (cookie name on HTTP requests).
    pub token_key: String,
}

/// Env
///
/// Runtime context: human-readable logs locally, JSON logs in production.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// A non-panicking configuration for tests that never touches the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            token_key: TOKEN_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables:
    /// - `APP_ENV`: `production` or anything else for local (default `local`).
    /// - `BIND_ADDR`: listen address (default `0.0.0.0:3000`).
    /// - `AUTH_TOKEN_KEY`: token storage key (default `token`); blank values fall back to the default.
    ///
    /// # Panics
    /// Panics if `BIND_ADDR` is set but is not a valid socket address, so a typo never
    /// silently binds the wrong interface.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .expect("FATAL: BIND_ADDR must be a socket address such as 0.0.0.0:3000");

        let token_key = env::var("AUTH_TOKEN_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| TOKEN_KEY.to_string());

        Self {
            env,
            bind_addr,
            token_key,
        }
    }
}
