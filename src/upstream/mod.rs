//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Action::ForwardGet / Action::ForwardPost
//!     → client.rs (build outbound request, fresh headers, timeout)
//!     → remote API over HTTPS
//!     → types.rs (UpstreamReply on 2xx, ForwardError otherwise)
//! ```
//!
//! # Design Decisions
//! - No retries: every failure surfaces on the request that caused it
//! - Upstream HTTP errors and transport failures are distinct variants
//! - Redirects are followed by the client; only the final status counts

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{ForwardError, ForwardResult, UpstreamReply, DEFAULT_CONTENT_TYPE};
