//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path + query)
//!     → router.rs (route lookup)
//!     → matcher.rs (prefix test, tail extraction)
//!     → Return: Action (forward, preflight, 400, 405, static)
//!
//! Route Compilation (at startup):
//!     UpstreamRoutes
//!     → Compile prefix matchers
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always yields the same action
//! - First match wins (configuration order)

pub mod matcher;
pub mod router;

pub use router::{Action, Route, Router};
