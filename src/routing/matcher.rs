//! Route matching module
//!
//! The portal recognises exactly two path shapes under `/secure`; everything else is unmatched.
//! Paths are normalized with [`normalize_path`] before they are classified.

use std::borrow::Cow;

/// First path segment shared by both routes
pub const SECURE_SEGMENT: &str = "secure";

/// A matched route, borrowing from the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/secure` or `/secure/`
    StatusPage,
    /// `/secure/<country>`, carrying the raw country segment
    Flag(&'a str),
    /// Any other path
    NotFound,
}

/// Resolve `.` and `..` segments the way a URL parser does for `http(s)` URLs.
///
/// `\` counts as a separator and `%2e` (any case) as a dot. A dot segment in last
/// position leaves a trailing slash, so `/secure/fr/..` becomes `/secure/`. Empty
/// segments are kept. Paths without dot segments are returned as-is.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let relative = path.strip_prefix(['/', '\\']).unwrap_or(path);
    let raw: Vec<&str> = relative.split(['/', '\\']).collect();
    if path.starts_with('/')
        && !path.contains('\\')
        && !raw.iter().any(|s| is_single_dot(s) || is_double_dot(s))
    {
        return Cow::Borrowed(path);
    }

    let last = raw.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(raw.len());
    for (i, segment) in raw.into_iter().enumerate() {
        if is_double_dot(segment) {
            out.pop();
            if i == last {
                out.push("");
            }
        } else if is_single_dot(segment) {
            if i == last {
                out.push("");
            }
        } else {
            out.push(segment);
        }
    }
    Cow::Owned(format!("/{}", out.join("/")))
}

fn is_single_dot(segment: &str) -> bool {
    segment == "." || segment.eq_ignore_ascii_case("%2e")
}

fn is_double_dot(segment: &str) -> bool {
    matches!(segment.to_ascii_lowercase().as_str(), ".." | ".%2e" | "%2e." | "%2e%2e")
}

/// Classify a normalized request path. First match wins:
///
/// 1. exactly `/secure` or `/secure/`
/// 2. exactly two non-empty segments, the first being `secure`
/// 3. anything else
pub fn match_route(path: &str) -> Route<'_> {
    if path == "/secure" || path == "/secure/" {
        return Route::StatusPage;
    }

    let mut segments = path_segments(path);
    match (segments.next(), segments.next(), segments.next()) {
        (Some(SECURE_SEGMENT), Some(country), None) => Route::Flag(country),
        _ => Route::NotFound,
    }
}

/// Split a path on `/`, dropping empty segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
