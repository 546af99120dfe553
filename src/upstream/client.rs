//! Outbound HTTP client for the remote APIs.
//!
//! # Responsibilities
//! - Issue the forwarded GET/POST with freshly set headers
//! - Enforce the per-route timeout
//! - Read the whole upstream body
//! - Separate upstream HTTP errors from transport failures

use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};

use crate::config::ClientConfig;
use crate::upstream::types::{ForwardError, ForwardResult, UpstreamReply, DEFAULT_CONTENT_TYPE};

const ACCEPT_JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Shared client wrapper.
///
/// The underlying pool is reused across requests, but no default headers are
/// installed on it: every call sets its own `Authorization`/`Accept`.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// Create a new upstream client.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut builder =
            Client::builder().user_agent(concat!("dev-cors-proxy/", env!("CARGO_PKG_VERSION")));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Forward a GET, copying the caller's `Authorization` value (empty when absent).
    pub async fn forward_get(
        &self,
        url: &str,
        authorization: Option<&HeaderValue>,
        timeout: Duration,
    ) -> ForwardResult<UpstreamReply> {
        let authorization = authorization
            .cloned()
            .unwrap_or_else(|| HeaderValue::from_static(""));

        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, ACCEPT_JSON)
            .timeout(timeout);

        send(request).await
    }

    /// Forward a form-encoded POST with the caller's raw body.
    pub async fn forward_post(
        &self,
        url: &str,
        body: Bytes,
        timeout: Duration,
    ) -> ForwardResult<UpstreamReply> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_URLENCODED)
            .header(ACCEPT, ACCEPT_JSON)
            .body(body)
            .timeout(timeout);

        send(request).await
    }
}

async fn send(request: RequestBuilder) -> ForwardResult<UpstreamReply> {
    let response = request.send().await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    // The timeout set on the request also covers reading the body.
    let body = response.bytes().await?;

    if status.is_success() {
        Ok(UpstreamReply {
            content_type: content_type.unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            body,
        })
    } else {
        Err(ForwardError::Upstream {
            status,
            body,
            content_type,
        })
    }
}
