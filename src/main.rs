//! Local development CORS proxy.
//!
//! Serves the front-end from the directory holding this executable and
//! relays three URL prefixes to remote APIs, adding CORS headers so the
//! browser can read the answers.
//!
//! ```text
//!   browser ──▶ :8080 ──┬─ /icu-internal/*     ──▶ https://intervals.icu/api/*
//!                       ├─ /strava-internal/*  ──▶ https://www.strava.com/api/v3/*
//!                       ├─ /strava-auth/*      ──▶ https://www.strava.com/oauth/*  (POST)
//!                       ├─ OPTIONS *           ──▶ 204 + CORS
//!                       └─ GET *               ──▶ static files
//! ```

use dev_cors_proxy::lifecycle::{signals, startup, Shutdown};
use dev_cors_proxy::observability::logging;
use dev_cors_proxy::{HttpServer, ProxyConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("dev-cors-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ProxyConfig::default();
    let listener = startup::bind(&config).await?;
    let local_addr = listener.local_addr()?;

    println!("{}\n", startup::banner(&config, local_addr));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signal_task = signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
