//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled prefix routes
//! - Map (method, target) to the action the server executes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan over three routes
//! - Explicit actions for preflight and rejected methods rather than a
//!   silent default

use std::time::Duration;

use axum::http::Method;

use crate::config::{ErrorBodyPolicy, ForwardMethod, UpstreamRoute, UpstreamRoutes};
use crate::routing::matcher::{has_dot_segment, PathPrefixMatcher};

/// A compiled upstream route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub matcher: PathPrefixMatcher,
    pub target: String,
    pub method: ForwardMethod,
    pub timeout: Duration,
    pub error_body: ErrorBodyPolicy,
}

impl From<&UpstreamRoute> for Route {
    fn from(config: &UpstreamRoute) -> Self {
        Self {
            name: config.name.clone(),
            matcher: PathPrefixMatcher::new(config.prefix.clone()),
            target: config.target.clone(),
            method: config.method,
            timeout: config.timeout,
            error_body: config.error_body,
        }
    }
}

/// Outcome of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    /// Forward as GET to `url`.
    ForwardGet {
        route: &'a str,
        url: String,
        timeout: Duration,
        pass_error_body: bool,
    },
    /// Forward the inbound body as a form-encoded POST to `url`.
    ForwardPost {
        route: &'a str,
        url: String,
        timeout: Duration,
    },
    /// CORS preflight, 204.
    Preflight,
    /// 405 with CORS headers.
    MethodNotAllowed,
    /// 400 with CORS headers: the tail would not survive URL normalisation.
    BadRequest,
    /// Hand off to the static file layer.
    StaticFile,
}

/// Prefix router over the configured upstreams.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile routes, preserving configuration order as match priority.
    pub fn from_config(routes: &UpstreamRoutes) -> Self {
        Self {
            routes: routes.iter().map(Route::from).collect(),
        }
    }

    /// Decide what to do with a request. `target` is the path plus query.
    pub fn route(&self, method: &Method, target: &str) -> Action<'_> {
        if *method == Method::OPTIONS {
            return Action::Preflight;
        }

        let forward_method = match *method {
            Method::GET => Some(ForwardMethod::Get),
            Method::POST => Some(ForwardMethod::Post),
            _ => None,
        };

        if let Some(forward_method) = forward_method {
            let hit = self
                .routes
                .iter()
                .filter(|r| r.method == forward_method)
                .find_map(|r| r.matcher.tail(target).map(|tail| (r, tail)));

            if let Some((route, tail)) = hit {
                if has_dot_segment(tail) {
                    return Action::BadRequest;
                }
                let url = format!("{}{}", route.target, tail);
                return match route.method {
                    ForwardMethod::Get => Action::ForwardGet {
                        route: &route.name,
                        url,
                        timeout: route.timeout,
                        pass_error_body: route.error_body == ErrorBodyPolicy::PassThrough,
                    },
                    ForwardMethod::Post => Action::ForwardPost {
                        route: &route.name,
                        url,
                        timeout: route.timeout,
                    },
                };
            }
        }

        match *method {
            Method::GET | Method::HEAD => Action::StaticFile,
            _ => Action::MethodNotAllowed,
        }
    }
}
