//! Static file serving.
//!
//! Requests that match no upstream route are served from the static root:
//! `dir/` resolves to `dir/index.html`, the content type comes from the file
//! extension, missing files are 404 and paths escaping the root are refused.
//! A directory without an index file gets a generated listing.

use std::convert::Infallible;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::config::StaticConfig;
use crate::http::listing;

/// Directory-rooted file server.
#[derive(Clone, Debug)]
pub struct StaticFiles {
    inner: ServeDir,
    root: PathBuf,
    list_directories: bool,
}

impl StaticFiles {
    pub fn new(config: &StaticConfig) -> Self {
        let inner = ServeDir::new(&config.root)
            .append_index_html_on_directories(config.append_index_html);
        Self {
            inner,
            root: config.root.clone(),
            list_directories: config.list_directories,
        }
    }

    /// Serve one request. Never fails: I/O problems become error statuses.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        let path = request.uri().path().to_owned();
        let result: Result<_, Infallible> = self.inner.clone().oneshot(request).await;
        let response = match result {
            Ok(response) => response.map(Body::new),
            Err(never) => match never {},
        };

        if self.list_directories && response.status() == StatusCode::NOT_FOUND && path.ends_with('/') {
            if let Some(listing) = listing::render(&self.root, &path).await {
                return listing;
            }
        }
        response
    }
}
