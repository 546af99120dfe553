//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the built-in configuration
//! - Bind the listener
//! - Print the startup banner to stdout
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{validate_config, ProxyConfig, ValidationError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join(.0))]
    Config(Vec<ValidationError>),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate the configuration and bind the listening socket.
pub async fn bind(config: &ProxyConfig) -> Result<TcpListener, StartupError> {
    validate_config(config).map_err(StartupError::Config)?;

    let address = config.listener.bind_address.clone();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Human-readable startup banner.
pub fn banner(config: &ProxyConfig, local_addr: SocketAddr) -> String {
    let mut lines = vec![format!("Serving app at  http://localhost:{}/", local_addr.port())];
    let width = config
        .routes
        .iter()
        .map(|r| r.prefix.len() + 1)
        .max()
        .unwrap_or(0);
    for route in config.routes.iter() {
        let from = format!("{}*", route.prefix);
        lines.push(format!("Proxying {:<width$}  -> {}*", from, route.target, width = width));
    }
    lines.push(format!("Static root     {}", config.static_files.root.display()));
    lines.push("Press Ctrl+C to stop.".to_string());
    lines.join("\n")
}
