//! Identity context extraction
//!
//! Reads the identity and geolocation headers set by the upstream access-control
//! layer. Values are trusted as-is; only an absent header falls back to a default.

use chrono::{DateTime, SecondsFormat, Utc};
use hyper::HeaderMap;

use crate::config::IdentityConfig;

pub const DEFAULT_EMAIL: &str = "unknown@user";
pub const DEFAULT_COUNTRY: &str = "UNKNOWN";

/// Per-request identity, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    pub email: String,
    pub country: String,
    /// ISO-8601 instant the request was handled
    pub timestamp: String,
}

impl IdentityContext {
    /// Extract the identity from `headers`, stamped with the current time
    pub fn from_headers(headers: &HeaderMap, names: &IdentityConfig) -> Self {
        Self::at(headers, names, Utc::now())
    }

    /// Extract the identity from `headers`, stamped with `now`
    pub fn at(headers: &HeaderMap, names: &IdentityConfig, now: DateTime<Utc>) -> Self {
        Self {
            email: header_or_default(headers, &names.email_header, DEFAULT_EMAIL),
            country: header_or_default(headers, &names.country_header, DEFAULT_COUNTRY),
            timestamp: iso_timestamp(now),
        }
    }
}

/// Value of header `name`, or `default` when the header is absent.
///
/// On duplicates the last value wins. An empty value is kept as-is.
pub fn header_or_default(headers: &HeaderMap, name: &str, default: &str) -> String {
    headers.get_all(name).iter().last().map_or_else(
        || default.to_string(),
        |value| String::from_utf8_lossy(value.as_bytes()).into_owned(),
    )
}

/// `2026-10-18T09:30:00.000Z`
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
