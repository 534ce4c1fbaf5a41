//! Content-Type matching for the double's `is` check
//!
//! Distinguishes three outcomes: no body or no `Content-Type` to match
//! against, a content type that matched none of the candidates, and a
//! match (carrying the candidate exactly as supplied).

use http::header::{CONTENT_LENGTH, CONTENT_TYPE, TRANSFER_ENCODING};
use http::HeaderMap;
use mime::Mime;

/// Outcome of matching the stored `Content-Type` against candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypeMatch {
    /// No request body, or no parseable `Content-Type` header
    Missing,
    /// A content type is present but none of the candidates matched
    Mismatch,
    /// The candidate that matched, as supplied by the caller
    Matched(String),
}

impl ContentTypeMatch {
    /// True only for [`ContentTypeMatch::Matched`]
    pub fn is_match(&self) -> bool {
        matches!(self, ContentTypeMatch::Matched(_))
    }

    /// The matched candidate, if any
    pub fn matched(&self) -> Option<&str> {
        match self {
            ContentTypeMatch::Matched(value) => Some(value),
            _ => None,
        }
    }
}

/// Match the stored `Content-Type` header against `types`
///
/// Candidates may be full MIME types (`application/json`), extension
/// shorthands (`json`), type wildcards (`text/*`, `*/*`) or suffix
/// wildcards (`+json`, `*/*+json`). An empty candidate list matches any
/// present content type and returns its essence.
pub fn type_is(headers: &HeaderMap, types: &[&str]) -> ContentTypeMatch {
    if !has_body(headers) {
        return ContentTypeMatch::Missing;
    }
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return ContentTypeMatch::Missing;
    };
    let Ok(actual) = content_type.trim().parse::<Mime>() else {
        return ContentTypeMatch::Missing;
    };
    let actual_kind = actual.type_().as_str().to_ascii_lowercase();
    let actual_sub = essence_subtype(&actual);

    if types.is_empty() {
        return ContentTypeMatch::Matched(format!("{actual_kind}/{actual_sub}"));
    }

    for candidate in types {
        let Some((kind, sub)) = normalize_candidate(candidate) else {
            continue;
        };
        if kind_matches(&kind, &actual_kind) && subtype_matches(&sub, &actual_sub) {
            return ContentTypeMatch::Matched((*candidate).to_string());
        }
    }

    ContentTypeMatch::Mismatch
}

/// A double "has a body" when the fixture carries a parseable
/// `Content-Length` or any `Transfer-Encoding`
fn has_body(headers: &HeaderMap) -> bool {
    if headers.contains_key(TRANSFER_ENCODING) {
        return true;
    }
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().parse::<u64>().is_ok())
        .unwrap_or(false)
}

/// Subtype including any `+suffix`, lower-cased
fn essence_subtype(mime: &Mime) -> String {
    mime.essence_str()
        .split_once('/')
        .map(|(_, sub)| sub.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Resolve a candidate to a `(type, subtype)` pattern
fn normalize_candidate(candidate: &str) -> Option<(String, String)> {
    if let Some(suffix) = candidate.strip_prefix('+') {
        // "+json" means any type with that suffix: */*+json
        return Some(("*".to_string(), format!("*+{}", suffix.to_ascii_lowercase())));
    }
    if candidate.contains('/') {
        let (kind, sub) = candidate.split_once('/')?;
        return Some((kind.to_ascii_lowercase(), sub.to_ascii_lowercase()));
    }
    let mime = mime_guess::from_ext(candidate).first()?;
    let (kind, sub) = mime.essence_str().split_once('/')?;
    Some((kind.to_ascii_lowercase(), sub.to_ascii_lowercase()))
}

fn kind_matches(expected: &str, actual: &str) -> bool {
    expected == "*" || expected == actual
}

fn subtype_matches(expected: &str, actual: &str) -> bool {
    if expected == "*" {
        return true;
    }
    if let Some(suffix) = expected.strip_prefix("*+") {
        return actual
            .rsplit_once('+')
            .map(|(_, actual_suffix)| actual_suffix == suffix)
            .unwrap_or(false);
    }
    expected == actual
}
