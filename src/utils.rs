//! Utility functions for url manipulation and log formatting.
//!
//! This module provides helper functions used throughout the pipeline:
//! - Query-string stripping for mirror lookups
//! - Trailing-slash detection and removal for the retry policy
//! - Path-segment extraction for search-engine lookups
//! - String truncation for logging upstream bodies

use url::Url;

/// Strip the query string (and anything after it) from a url.
///
/// Archive snapshots are indexed without query parameters, so mirror
/// lookups are query-insensitive.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_url("https://a.com/x?utm=1"), "https://a.com/x");
/// ```
pub fn sanitize_url(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Returns the url without its trailing `/`, or `None` when there is none.
pub fn strip_trailing_slash(url: &str) -> Option<&str> {
    url.strip_suffix('/')
}

/// The final `/`-separated segment of a url, used as a search term.
///
/// Empty when the url ends with a slash.
pub fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or("")
}

/// Check that `url` is an absolute http(s) url.
pub fn is_http_url(url: &str) -> bool {
    Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a char boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
