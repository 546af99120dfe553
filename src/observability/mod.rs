//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server and forwarding code produce:
//!     → logging.rs (structured log events, access-log filter)
//!     → tower-http TraceLayer spans keyed by x-request-id
//!
//! Consumers:
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span
//! - Access logging is filtered to keep asset noise out

pub mod logging;
