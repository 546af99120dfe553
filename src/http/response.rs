//! Response construction for the proxied routes.
//!
//! # Responsibilities
//! - Turn upstream replies and forwarding errors into client responses
//! - Add CORS headers to every response built here
//! - Set `Content-Length` to the byte length actually relayed
//!
//! # Design Decisions
//! - Upstream headers other than `Content-Type` are never copied
//! - Upstream 2xx statuses are normalised to 200
//! - Transport failures become a bodyless 502; details stay in the log

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

use crate::http::cors;
use crate::upstream::{ForwardError, UpstreamReply, DEFAULT_CONTENT_TYPE};

/// Bodyless response carrying only the CORS headers.
pub fn cors_only(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    cors::apply(response.headers_mut());
    response
}

/// 204 answer to a preflight request.
pub fn preflight() -> Response {
    cors_only(StatusCode::NO_CONTENT)
}

/// Response with a body, explicit content type and length, plus CORS headers.
pub fn with_body(status: StatusCode, content_type: &str, body: Bytes) -> Response {
    let content_type = HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
    let length = HeaderValue::from(body.len());

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(CONTENT_LENGTH, length);
    cors::apply(headers);
    response
}

/// Relay a successful upstream reply as 200.
pub fn from_reply(reply: UpstreamReply) -> Response {
    with_body(StatusCode::OK, &reply.content_type, reply.body)
}

/// Map a forwarding error to the client response.
///
/// `pass_error_body` selects between relaying the upstream error body as
/// JSON and answering with the status alone.
pub fn from_error(error: ForwardError, pass_error_body: bool) -> Response {
    match error {
        ForwardError::Upstream { status, body, .. } if pass_error_body => {
            with_body(status, DEFAULT_CONTENT_TYPE, body)
        }
        ForwardError::Upstream { status, .. } => cors_only(status),
        ForwardError::Transport { .. } => cors_only(StatusCode::BAD_GATEWAY),
    }
}
