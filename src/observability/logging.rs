//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Decide which requests appear in the access log
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Log level configurable via `RUST_LOG`
//! - Static asset requests are kept out of the access log; only proxied
//!   routes and the index page are logged

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::UpstreamRoutes;

pub const DEFAULT_FILTER: &str = "dev_cors_proxy=info,tower_http=warn";

/// Install the global subscriber. Call once per process.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Whether a request target belongs in the access log.
pub fn should_log(target: &str, routes: &UpstreamRoutes) -> bool {
    let path = target.split('?').next().unwrap_or(target);
    routes.iter().any(|r| target.contains(r.prefix.as_str()))
        || path == "/"
        || path == "/index.html"
}
