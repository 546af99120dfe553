//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all handler
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener, shut down gracefully
//! - Dispatch requests through the routing engine
//! - Execute the chosen action (forward, preflight, 400, 405, static)

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH},
        Request, StatusCode,
    },
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::request::{request_id_layer, routing_target, RequestIdExt};
use crate::http::response;
use crate::http::static_files::StaticFiles;
use crate::lifecycle::shutdown;
use crate::observability::logging::should_log;
use crate::routing::{Action, Router as ProxyRouter};
use crate::upstream::{ForwardError, ForwardResult, UpstreamClient, UpstreamReply};

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub router: Arc<ProxyRouter>,
    pub client: UpstreamClient,
    pub static_files: StaticFiles,
}

/// HTTP server for the development proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let config = Arc::new(config);
        let state = AppState {
            router: Arc::new(ProxyRouter::from_config(&config.routes)),
            client: UpstreamClient::new(&config.client)?,
            static_files: StaticFiles::new(&config.static_files),
            config: config.clone(),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        tracing::debug_span!(
                            "request",
                            request_id = %request.request_id(),
                            method = %request.method(),
                            path = %request.uri().path(),
                        )
                    })
                    // 5xx answers are already logged by `finish` with their cause.
                    .on_failure(()),
            )
            .layer(request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_root = %self.config.static_files.root.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

}

/// Catch-all handler: dispatch, execute, access-log.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let target = routing_target(request.uri()).to_string();

    let response = dispatch(&state, request, &request_id, &target).await;

    if should_log(&target, &state.config.routes) {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            target = %target,
            status = response.status().as_u16(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Request handled"
        );
    }

    response
}

/// Execute the action the router picked for this request.
async fn dispatch(
    state: &AppState,
    request: Request<Body>,
    request_id: &str,
    target: &str,
) -> Response {
    match state.router.route(request.method(), target) {
        Action::Preflight => response::preflight(),
        Action::MethodNotAllowed => response::cors_only(StatusCode::METHOD_NOT_ALLOWED),
        Action::BadRequest => {
            tracing::warn!(request_id = %request_id, path = %target, "Dot segment in proxied path");
            response::cors_only(StatusCode::BAD_REQUEST)
        }
        Action::StaticFile => state.static_files.serve(request).await,
        Action::ForwardGet {
            route,
            url,
            timeout,
            pass_error_body,
        } => {
            let authorization = request.headers().get(AUTHORIZATION);
            let result = state.client.forward_get(&url, authorization, timeout).await;
            finish(route, &url, request_id, result, pass_error_body)
        }
        Action::ForwardPost {
            route,
            url,
            timeout,
        } => {
            let limit = state.config.limits.max_body_size;
            let declared = request
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<usize>().ok());

            // The body length comes from `Content-Length`; without one nothing is forwarded.
            let body = match declared {
                None | Some(0) => Bytes::new(),
                Some(len) if len > limit => {
                    tracing::warn!(request_id = %request_id, route, limit, "Request body too large");
                    return response::cors_only(StatusCode::PAYLOAD_TOO_LARGE);
                }
                Some(len) => match axum::body::to_bytes(request.into_body(), len).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(request_id = %request_id, route, error = %e, "Failed to read request body");
                        return response::cors_only(StatusCode::BAD_REQUEST);
                    }
                },
            };

            let result = state.client.forward_post(&url, body, timeout).await;
            finish(route, &url, request_id, result, true)
        }
    }
}

/// Log a forwarding outcome and turn it into the client response.
fn finish(
    route: &str,
    url: &str,
    request_id: &str,
    result: ForwardResult<UpstreamReply>,
    pass_error_body: bool,
) -> Response {
    // Query strings may carry OAuth client secrets; keep them out of logs.
    let upstream = url.split('?').next().unwrap_or(url);

    match result {
        Ok(reply) => response::from_reply(reply),
        Err(error) => {
            match &error {
                ForwardError::Upstream { status, .. } => {
                    tracing::warn!(
                        request_id = %request_id,
                        route,
                        upstream,
                        status = status.as_u16(),
                        "Upstream returned error status"
                    );
                }
                ForwardError::Transport { cause } => {
                    tracing::error!(
                        request_id = %request_id,
                        route,
                        upstream,
                        timeout = error.is_timeout(),
                        error = %cause,
                        "Proxy error"
                    );
                }
            }
            response::from_error(error, pass_error_body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    use tower::ServiceExt;

    use crate::config::ICU_ROUTE;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn refused_addr() -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }

    #[tokio::test]
    async fn transport_failure_is_logged_once() {
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut config = ProxyConfig::default();
        config.client.system_proxy = false;
        config.routes.get_mut(ICU_ROUTE).unwrap().target = format!("http://{}/api/", refused_addr());
        let server = HttpServer::new(config).unwrap();

        let request = Request::builder()
            .uri("/icu-internal/v1/athlete/0")
            .body(Body::empty())
            .unwrap();
        let response = server.router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("Proxy error").count(), 1, "{}", output);
        assert!(!output.contains("response failed"), "{}", output);
    }
}
