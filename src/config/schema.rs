//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Every value is a compile-time default; the struct is built once at
//! startup and shared read-only afterwards.

use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the development proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream routes, checked in order (first match wins).
    pub routes: UpstreamRoutes,

    /// Static file settings.
    pub static_files: StaticConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Outbound client settings.
    pub client: ClientConfig,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// HTTP method used towards the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMethod {
    /// Bodyless GET carrying the caller's `Authorization`.
    Get,
    /// Form-encoded POST carrying the caller's body.
    Post,
}

/// What the proxy sends back when the upstream answers with a non-2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorBodyPolicy {
    /// Status and CORS headers only.
    Drop,
    /// Status, `application/json` content type and the upstream body.
    PassThrough,
}

/// One prefix → remote base URL mapping.
#[derive(Debug, Clone)]
pub struct UpstreamRoute {
    /// Route identifier for logging.
    pub name: String,

    /// Inbound path prefix, including leading and trailing slash.
    pub prefix: String,

    /// Outbound base URL the tail is appended to.
    pub target: String,

    /// Method the route answers to and forwards with.
    pub method: ForwardMethod,

    /// Total time allowed for the upstream exchange.
    pub timeout: Duration,

    /// Handling of upstream error bodies.
    pub error_body: ErrorBodyPolicy,
}

/// Ordered list of upstream routes.
#[derive(Debug, Clone)]
pub struct UpstreamRoutes(pub Vec<UpstreamRoute>);

impl UpstreamRoutes {
    pub fn iter(&self) -> std::slice::Iter<'_, UpstreamRoute> {
        self.0.iter()
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&UpstreamRoute> {
        self.0.iter().find(|r| r.name == name)
    }

    /// Look up a route by name for mutation (tests point routes at mock upstreams).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut UpstreamRoute> {
        self.0.iter_mut().find(|r| r.name == name)
    }
}

pub const ICU_ROUTE: &str = "icu";
pub const STRAVA_API_ROUTE: &str = "strava-api";
pub const STRAVA_AUTH_ROUTE: &str = "strava-auth";

impl Default for UpstreamRoutes {
    fn default() -> Self {
        Self(vec![
            UpstreamRoute {
                name: ICU_ROUTE.to_string(),
                prefix: "/icu-internal/".to_string(),
                target: "https://intervals.icu/api/".to_string(),
                method: ForwardMethod::Get,
                timeout: Duration::from_secs(15),
                error_body: ErrorBodyPolicy::Drop,
            },
            UpstreamRoute {
                name: STRAVA_API_ROUTE.to_string(),
                prefix: "/strava-internal/".to_string(),
                target: "https://www.strava.com/api/v3/".to_string(),
                method: ForwardMethod::Get,
                timeout: Duration::from_secs(30),
                error_body: ErrorBodyPolicy::PassThrough,
            },
            UpstreamRoute {
                name: STRAVA_AUTH_ROUTE.to_string(),
                prefix: "/strava-auth/".to_string(),
                target: "https://www.strava.com/oauth/".to_string(),
                method: ForwardMethod::Post,
                timeout: Duration::from_secs(15),
                error_body: ErrorBodyPolicy::PassThrough,
            },
        ])
    }
}

/// Static file configuration.
#[derive(Debug, Clone)]
pub struct StaticConfig {
    /// Directory served for requests that match no upstream route.
    pub root: PathBuf,

    /// Whether `dir/` resolves to `dir/index.html`.
    pub append_index_html: bool,

    /// Whether a directory with no index file gets a generated listing.
    pub list_directories: bool,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: resolve_static_root(),
            append_index_html: true,
            list_directories: true,
        }
    }
}

/// Directory containing the running executable, or the working directory
/// if that cannot be determined.
pub fn resolve_static_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Request limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes for forwarded POSTs.
    pub max_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Outbound client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { system_proxy: true }
    }
}
