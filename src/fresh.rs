//! HTTP freshness comparison
//!
//! Compares a request's conditional headers against a response's validator
//! headers: `If-None-Match` vs `ETag` (weak comparison), then
//! `If-Modified-Since` vs `Last-Modified`. A request `Cache-Control:
//! no-cache` vetoes freshness outright.

use chrono::{DateTime, FixedOffset};
use http::HeaderMap;

/// True when the cached representation the client holds is still valid
pub fn is_fresh(req_headers: &HeaderMap, res_headers: &HeaderMap) -> bool {
    let modified_since = header_str(req_headers, "if-modified-since");
    let none_match = header_str(req_headers, "if-none-match");

    // Unconditional requests are never fresh.
    if modified_since.is_none() && none_match.is_none() {
        return false;
    }

    if let Some(cache_control) = header_str(req_headers, "cache-control") {
        if has_no_cache_directive(cache_control) {
            return false;
        }
    }

    if let Some(none_match) = none_match {
        if none_match.trim() != "*" {
            let Some(etag) = header_str(res_headers, "etag") else {
                return false;
            };
            let matched = none_match
                .split(',')
                .map(str::trim)
                .any(|token| etag_matches(token, etag));
            if !matched {
                return false;
            }
        }
    }

    if let Some(modified_since) = modified_since {
        let last_modified = header_str(res_headers, "last-modified");
        let up_to_date = match (
            last_modified.and_then(parse_http_date),
            parse_http_date(modified_since),
        ) {
            (Some(last_modified), Some(modified_since)) => last_modified <= modified_since,
            // Unparseable dates count as stale.
            _ => false,
        };
        if !up_to_date {
            return false;
        }
    }

    true
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn has_no_cache_directive(cache_control: &str) -> bool {
    cache_control
        .split(',')
        .any(|directive| directive.trim().eq_ignore_ascii_case("no-cache"))
}

/// Weak comparison: `W/"x"` and `"x"` validate against each other
fn etag_matches(token: &str, etag: &str) -> bool {
    token == etag
        || token.strip_prefix("W/") == Some(etag)
        || etag.strip_prefix("W/") == Some(token)
}

fn parse_http_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(value).ok()
}
