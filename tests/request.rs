//! End-to-end exercises of the request double's accessor surface, built
//! the way a test suite would actually use it: one fixture per scenario.

use mock_http_request::{
    ByteRange, ContentTypeMatch, MockRequest, RangeOutcome, RequestOptions,
};
use serde_json::{json, Value};

#[test]
fn instantiates_with_fixture_headers_lower_cased() {
    let request = MockRequest::new(
        RequestOptions::new()
            .header("Content-Type", "text/plain")
            .header("Content-Length", "10"),
    );

    assert_eq!(request.headers.get("content-type").unwrap(), "text/plain");
    assert_eq!(request.headers.get("content-length").unwrap(), "10");
}

#[test]
fn gets_request_headers_case_insensitively() {
    let request = MockRequest::new(RequestOptions::new().header("Content-Type", "text/plain"));

    assert_eq!(request.get("Content-Type"), Some("text/plain"));
    assert_eq!(request.get("content-type"), Some("text/plain"));
    assert_eq!(request.header("Content-Type"), Some("text/plain"));
    assert_eq!(request.get("Something"), None);
}

#[test]
fn negotiates_media_types() {
    let request = MockRequest::new(RequestOptions::new().header("Accept", "*/*"));

    assert_eq!(request.accepted_types(), vec!["*/*".to_string()]);
    assert_eq!(request.accepts(&["html"]), Some("html".to_string()));
    // First candidate wins under a full wildcard.
    assert_eq!(request.accepts(&["html", "json"]), Some("html".to_string()));
}

#[test]
fn negotiates_encodings_against_default_header() {
    // Default Accept-Encoding: gzip, deflate
    let request = MockRequest::default();

    assert_eq!(request.accepts_encodings(&["zip"]), None);
    assert_eq!(
        request.accepts_encodings(&["deflate"]),
        Some("deflate".to_string())
    );
    assert_eq!(
        request.accepts_encodings(&["gzip"]),
        Some("gzip".to_string())
    );
}

#[test]
fn negotiates_charsets_and_languages() {
    let request = MockRequest::default();

    // No Accept-Charset header: anything goes.
    assert_eq!(
        request.accepts_charsets(&["utf-8"]),
        Some("utf-8".to_string())
    );
    // Default Accept-Language: en-US,en;q=0.5
    assert_eq!(
        request.accepts_languages(&["en-US"]),
        Some("en-US".to_string())
    );
    assert_eq!(request.accepts_languages(&["sw"]), None);
}

#[test]
fn parses_range_header_capped_to_size() {
    let request = MockRequest::new(RequestOptions::new().header("Range", "bytes=0-1024"));

    match request.range(2048) {
        Some(RangeOutcome::Ranges(parsed)) => {
            assert_eq!(parsed.unit, "bytes");
            assert_eq!(parsed.ranges[0], ByteRange { start: 0, end: 1024 });
        }
        other => panic!("expected parsed ranges, got {other:?}"),
    }
}

#[test]
fn range_outcomes_stay_distinguishable() {
    // No Range header at all.
    assert_eq!(MockRequest::default().range(100), None);

    let request = MockRequest::new(RequestOptions::new().header("Range", "bytes=900-999"));
    assert_eq!(request.range(100), Some(RangeOutcome::Unsatisfiable));

    let request = MockRequest::new(RequestOptions::new().header("Range", "bytes"));
    assert_eq!(request.range(100), Some(RangeOutcome::Malformed));
}

#[test]
fn exposes_query_map() {
    let request = MockRequest::default();
    assert!(request.query.is_empty());

    let request = MockRequest::new(RequestOptions::new().query("id", 20));
    assert_eq!(request.query.get("id"), Some(&Value::from(20)));
}

#[test]
fn resolves_params_from_route_body_then_query() {
    let request = MockRequest::new(
        RequestOptions::new()
            .body_field("id", 103)
            .param("limit", 10)
            .query("where", json!({ "id": 103 })),
    );

    assert_eq!(request.param("id"), Some(&Value::from(103)));
    assert_eq!(request.param("limit"), Some(&Value::from(10)));
    assert_eq!(request.param("where"), Some(&json!({ "id": 103 })));
    assert_eq!(
        request.param_or("missing", Value::from("fallback")),
        Value::from("fallback")
    );
}

#[test]
fn checks_content_type_candidates() {
    // Default Content-Type: application/json with a Content-Length.
    let request = MockRequest::default();

    assert_eq!(request.is(&["html"]), ContentTypeMatch::Mismatch);
    assert_eq!(
        request.is(&["json"]),
        ContentTypeMatch::Matched("json".to_string())
    );
    assert_eq!(
        request.is(&["application/json"]),
        ContentTypeMatch::Matched("application/json".to_string())
    );
    assert_eq!(
        request.is(&["application/*"]),
        ContentTypeMatch::Matched("application/*".to_string())
    );
}

#[test]
fn distinguishes_missing_content_from_mismatch() {
    // Strip the body signals: no Content-Length means nothing to match.
    let mut request = MockRequest::default();
    request.headers.remove(http::header::CONTENT_LENGTH);

    assert_eq!(request.is(&["json"]), ContentTypeMatch::Missing);
    assert!(!request.is(&["json"]).is_match());
}

#[test]
fn reports_protocol_and_secure_from_connection_state() {
    let request = MockRequest::default();
    assert_eq!(request.protocol(), "http");
    assert!(!request.secure());

    let request = MockRequest::new(RequestOptions::new().encrypted(true));
    assert_eq!(request.protocol(), "https");
    assert!(request.secure());
}

#[test]
fn reports_remote_address() {
    let request = MockRequest::default();
    assert_eq!(request.ip(), "localhost");
    assert_eq!(request.ips(), vec!["localhost".to_string()]);

    let request = MockRequest::new(RequestOptions::new().ip("192.56.56.7"));
    assert_eq!(request.ip(), "192.56.56.7");
    assert_eq!(request.ips(), vec!["192.56.56.7".to_string()]);
}

#[test]
fn computes_subdomains_with_default_offset() {
    // Default Host: www.localhost.com
    let request = MockRequest::default();
    assert_eq!(request.subdomains(), vec!["www".to_string()]);

    let request =
        MockRequest::new(RequestOptions::new().header("Host", "demo.static.localhost.com"));
    assert_eq!(
        request.subdomains(),
        vec!["static".to_string(), "demo".to_string()]
    );
}

#[test]
fn parses_host_header_to_hostname() {
    let request = MockRequest::default();
    assert_eq!(request.hostname().as_deref(), Some("www.localhost.com"));

    let request = MockRequest::new(RequestOptions::new().header("Host", "demo.localhost.com"));
    assert_eq!(request.hostname().as_deref(), Some("demo.localhost.com"));
    assert_eq!(request.host(), request.hostname());
}

#[test]
fn strips_query_string_from_path() {
    let request = MockRequest::new(RequestOptions::new().url("users?id=1234566"));
    assert_eq!(request.path(), "users");
}

#[test]
fn default_request_is_stale() {
    let request = MockRequest::default();
    assert!(!request.fresh());
    assert!(request.stale());
}

#[test]
fn conditional_get_with_matching_etag_is_fresh() {
    let request = MockRequest::new(
        RequestOptions::new()
            // Override the default no-cache, which vetoes freshness.
            .header("Cache-Control", "max-age=0")
            .header("If-None-Match", "\"abc\"")
            .response_header("ETag", "\"abc\""),
    );
    assert!(request.fresh());
    assert!(!request.stale());
}

#[test]
fn detects_xml_http_requests() {
    let request = MockRequest::default();
    assert!(!request.xhr());

    let request =
        MockRequest::new(RequestOptions::new().header("X-Requested-With", "XMLHttpRequest"));
    assert!(request.xhr());

    let request =
        MockRequest::new(RequestOptions::new().header("X-Requested-With", "xmlhttprequest"));
    assert!(request.xhr());
}

#[test]
fn builds_from_json_fixture() {
    let options: RequestOptions = serde_json::from_value(json!({
        "headers": { "Host": "api.service.example.com" },
        "connection": { "encrypted": true, "ip": "10.1.2.3" },
        "app": { "subdomain offset": 2 },
        "url": "/v1/users?page=2",
        "method": "POST",
        "body": { "name": "alice" }
    }))
    .unwrap();
    let request = MockRequest::new(options);

    assert_eq!(request.method, http::Method::POST);
    assert!(request.secure());
    assert_eq!(request.ip(), "10.1.2.3");
    assert_eq!(request.path(), "/v1/users");
    assert_eq!(
        request.subdomains(),
        vec!["service".to_string(), "api".to_string()]
    );
    assert_eq!(request.param("name"), Some(&Value::from("alice")));
}
