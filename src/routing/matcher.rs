//! Route matching logic.
//!
//! # Responsibilities
//! - Match the request target (path plus query) against a prefix
//! - Split off the tail that is forwarded verbatim
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - The query string is part of the tail, never re-encoded
//! - No regex to guarantee O(n) matching
//! - Tails with `.`/`..` segments are flagged: the outbound URL parser would
//!   collapse them and could climb out of the upstream base path

/// Matches the request target prefix and yields the remainder.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns true if the target starts with this prefix.
    pub fn matches(&self, target: &str) -> bool {
        target.starts_with(&self.prefix)
    }

    /// Everything after the prefix, or `None` on mismatch.
    pub fn tail<'a>(&self, target: &'a str) -> Option<&'a str> {
        target.strip_prefix(self.prefix.as_str())
    }
}

/// True when the path part of `tail` has a `.` or `..` segment, including
/// percent-encoded dots and backslash separators that URL parsers treat as `/`.
pub fn has_dot_segment(tail: &str) -> bool {
    let path = tail.split(['?', '#']).next().unwrap_or(tail);
    path.split(['/', '\\']).any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}
