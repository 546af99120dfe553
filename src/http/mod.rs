//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all handler)
//!     → request.rs (request ID, routing target)
//!     → [routing layer picks an action]
//!     → [upstream client forwards] or static_files.rs (+ listing.rs)
//!     → response.rs + cors.rs (status policy, CORS headers)
//!     → Send to client
//! ```

pub mod cors;
pub mod listing;
pub mod request;
pub mod response;
pub mod server;
pub mod static_files;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
