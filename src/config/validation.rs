//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic checks on the built-in configuration
//! - Validate value ranges (timeouts > 0, body limit > 0)
//! - Detect duplicate prefixes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the listener is bound

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("route '{route}': prefix '{prefix}' must start and end with '/'")]
    Prefix { route: String, prefix: String },

    #[error("route '{route}': prefix '{prefix}' is already used")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route '{route}': invalid target '{target}': {reason}")]
    Target {
        route: String,
        target: String,
        reason: String,
    },

    #[error("route '{0}': timeout must be non-zero")]
    ZeroTimeout(String),

    #[error("max_body_size must be non-zero")]
    ZeroBodyLimit,
}

/// Check the configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for route in config.routes.iter() {
        if route.prefix.len() < 2 || !route.prefix.starts_with('/') || !route.prefix.ends_with('/') {
            errors.push(ValidationError::Prefix {
                route: route.name.clone(),
                prefix: route.prefix.clone(),
            });
        }
        if !seen.insert(route.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                route: route.name.clone(),
                prefix: route.prefix.clone(),
            });
        }

        if let Some(reason) = check_target(&route.target) {
            errors.push(ValidationError::Target {
                route: route.name.clone(),
                target: route.target.clone(),
                reason,
            });
        }

        if route.timeout.is_zero() {
            errors.push(ValidationError::ZeroTimeout(route.name.clone()));
        }
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_target(target: &str) -> Option<String> {
    let url = match url::Url::parse(target) {
        Ok(u) => u,
        Err(e) => return Some(e.to_string()),
    };
    if url.scheme() != "http" && url.scheme() != "https" {
        return Some(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !target.ends_with('/') {
        return Some("must end with '/'".to_string());
    }
    None
}
