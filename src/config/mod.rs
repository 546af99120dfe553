//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! compile-time defaults
//!     → schema.rs (ProxyConfig::default)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the request router
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; there is no reload path
//! - No config file, environment variables or flags: the three upstream
//!   mappings are fixed, tests override fields on the struct directly

pub mod schema;
pub mod validation;

pub use schema::{
    ClientConfig, ErrorBodyPolicy, ForwardMethod, LimitsConfig, ListenerConfig, ProxyConfig,
    StaticConfig, UpstreamRoute, UpstreamRoutes, ICU_ROUTE, STRAVA_API_ROUTE, STRAVA_AUTH_ROUTE,
};
pub use validation::{validate_config, ValidationError};
