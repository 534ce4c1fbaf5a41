//! Request double mimicking an Express-style incoming request
//!
//! Construction merges the fixture over documented defaults once; every
//! accessor afterwards is a pure read of the stored state, recomputed per
//! call with no caching.

use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;

use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use serde_json::Value;
use tracing::{trace, warn};

use crate::content_type::{self, ContentTypeMatch};
use crate::errors::{MockRequestError, MockResult};
use crate::fresh;
use crate::negotiation;
use crate::options::{self, RequestOptions};
use crate::range::{self, RangeOutcome};
use crate::response::MockResponse;

/// Remote connection state carried by the double
#[derive(Debug, Clone)]
struct Connection {
    encrypted: bool,
    ip: String,
}

/// Request double presenting the read surface of a framework request
///
/// The stored maps are public so tests can poke at them directly, the same
/// way the mirrored framework exposes `req.query`, `req.body` and friends.
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub query: HashMap<String, Value>,
    pub body: HashMap<String, Value>,
    pub params: HashMap<String, Value>,
    pub cookies: HashMap<String, Value>,
    /// Paired response double; freshness reads its status and headers.
    pub res: MockResponse,
    connection: Connection,
    subdomain_offset: usize,
}

/// Fold a fixture header into the map, skipping entries the header types
/// reject. Names come out lower-cased regardless of input casing.
pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    let header_name = match HeaderName::from_str(name) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(header = name, "skipping fixture header with invalid name");
            return;
        }
    };
    match HeaderValue::from_str(value) {
        Ok(parsed) => {
            headers.insert(header_name, parsed);
        }
        Err(_) => warn!(header = name, "skipping fixture header with invalid value"),
    }
}

impl MockRequest {
    /// Build a double from a fixture, merging it over the defaults
    /// documented in [`RequestOptions`]
    pub fn new(options: RequestOptions) -> Self {
        let mut headers = HeaderMap::new();
        for (name, value) in options::DEFAULT_HEADERS {
            insert_header(&mut headers, name, value);
        }
        for (name, value) in &options.headers {
            insert_header(&mut headers, name, value);
        }

        let method = match options.method.as_deref() {
            Some(raw) => Method::from_str(raw).unwrap_or_else(|_| {
                warn!(method = raw, "invalid method in fixture, falling back to GET");
                Method::GET
            }),
            None => Method::GET,
        };

        let connection = Connection {
            encrypted: options.connection.encrypted.unwrap_or(false),
            ip: options
                .connection
                .ip
                .unwrap_or_else(|| options::DEFAULT_REMOTE_IP.to_string()),
        };

        let request = Self {
            method,
            url: options.url.unwrap_or_else(|| options::DEFAULT_URL.to_string()),
            headers,
            query: options.query,
            body: options.body,
            params: options.params,
            cookies: options.cookies,
            res: MockResponse::from_options(options.res),
            connection,
            subdomain_offset: options
                .app
                .subdomain_offset
                .unwrap_or(options::DEFAULT_SUBDOMAIN_OFFSET),
        };
        trace!(method = %request.method, url = %request.url, "built request double");
        request
    }

    /// Get a request header, case-insensitively
    ///
    /// `Referrer` and `Referer` are interchangeable; when both are present
    /// `Referrer` wins. Aliased as [`MockRequest::header`].
    pub fn get(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case("referer") || name.eq_ignore_ascii_case("referrer") {
            return self
                .header_str("referrer")
                .or_else(|| self.header_str("referer"));
        }
        self.header_str(name)
    }

    /// Alias for [`MockRequest::get`]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
    }

    fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Add a header after construction; the fallible counterpart to the
    /// permissive fixture merge
    pub fn add_header<K, V>(&mut self, name: K, value: V) -> MockResult<()>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let header_name = HeaderName::from_str(name.as_ref())
            .map_err(|_| MockRequestError::invalid_header_name(name.as_ref()))?;
        let header_value = HeaderValue::from_str(value.as_ref())
            .map_err(|e| MockRequestError::invalid_header_value(name.as_ref(), e.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    /// Change the method after construction; unlike the fixture merge,
    /// which falls back to GET, this rejects invalid method tokens
    pub fn set_method<T: AsRef<str>>(&mut self, method: T) -> MockResult<()> {
        self.method = Method::from_str(method.as_ref())
            .map_err(|_| MockRequestError::invalid_method(method.as_ref()))?;
        Ok(())
    }

    // --- content negotiation ----------------------------------------------

    /// Best acceptable media type among `types` per the `Accept` header,
    /// returned exactly as supplied; `None` when nothing is acceptable
    pub fn accepts(&self, types: &[&str]) -> Option<String> {
        negotiation::preferred_media_type(self.get("accept"), types)
    }

    /// The client's full media type preference list, quality order
    pub fn accepted_types(&self) -> Vec<String> {
        negotiation::media_type_preferences(self.get("accept"))
    }

    /// Best acceptable content coding per the `Accept-Encoding` header
    pub fn accepts_encodings(&self, encodings: &[&str]) -> Option<String> {
        negotiation::preferred_encoding(self.get("accept-encoding"), encodings)
    }

    /// The client's content-coding preference list, quality order
    pub fn accepted_encodings(&self) -> Vec<String> {
        negotiation::encoding_preferences(self.get("accept-encoding"))
    }

    /// Best acceptable charset per the `Accept-Charset` header
    pub fn accepts_charsets(&self, charsets: &[&str]) -> Option<String> {
        negotiation::preferred_charset(self.get("accept-charset"), charsets)
    }

    /// The client's charset preference list, quality order
    pub fn accepted_charsets(&self) -> Vec<String> {
        negotiation::charset_preferences(self.get("accept-charset"))
    }

    /// Best acceptable language per the `Accept-Language` header
    pub fn accepts_languages(&self, languages: &[&str]) -> Option<String> {
        negotiation::preferred_language(self.get("accept-language"), languages)
    }

    /// The client's language preference list, quality order
    pub fn accepted_languages(&self) -> Vec<String> {
        negotiation::language_preferences(self.get("accept-language"))
    }

    // --- range / params / content type ------------------------------------

    /// Parse the `Range` header against a resource of `size` bytes
    ///
    /// `None` means no range was requested; the three parse outcomes stay
    /// distinguishable through [`RangeOutcome`].
    pub fn range(&self, size: u64) -> Option<RangeOutcome> {
        let header = self.get("range").filter(|value| !value.trim().is_empty())?;
        Some(range::parse(size, header))
    }

    /// Look up `name` in route params, then body, then query string
    ///
    /// Presence is own-key existence, not truthiness: a stored `0`, `false`
    /// or `null` still wins over later sources.
    pub fn param(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.params.get(name) {
            return Some(value);
        }
        if let Some(value) = self.body.get(name) {
            return Some(value);
        }
        self.query.get(name)
    }

    /// [`MockRequest::param`] with a fallback value
    pub fn param_or(&self, name: &str, default: Value) -> Value {
        self.param(name).cloned().unwrap_or(default)
    }

    /// Match the stored `Content-Type` against candidate types
    pub fn is(&self, types: &[&str]) -> ContentTypeMatch {
        content_type::type_is(&self.headers, types)
    }

    // --- derived properties (recomputed per call) --------------------------

    /// `"https"` when the connection is encrypted, `"http"` otherwise.
    /// Proxy headers (`X-Forwarded-Proto`) are deliberately not consulted.
    pub fn protocol(&self) -> &'static str {
        if self.connection.encrypted {
            "https"
        } else {
            "http"
        }
    }

    /// Shorthand for `protocol() == "https"`
    pub fn secure(&self) -> bool {
        self.protocol() == "https"
    }

    /// Remote address of the connection; no proxy-trust chain
    pub fn ip(&self) -> &str {
        &self.connection.ip
    }

    /// Address list as the mirrored framework reports it; always a single
    /// element here since multi-hop proxy chains are out of scope
    pub fn ips(&self) -> Vec<String> {
        vec![self.connection.ip.clone()]
    }

    /// Hostname from the `Host` header, port stripped
    ///
    /// Bracketed IPv6 literals lose their brackets: `[::1]:8080` -> `::1`.
    pub fn hostname(&self) -> Option<String> {
        let host = self.get("host")?;
        if host.is_empty() {
            return None;
        }
        if let Some(bracketed) = host.strip_prefix('[') {
            let end = bracketed.find(']')?;
            return Some(bracketed[..end].to_string());
        }
        match host.find(':') {
            Some(index) => Some(host[..index].to_string()),
            None => Some(host.to_string()),
        }
    }

    /// Alias for [`MockRequest::hostname`], kept for naming-migration
    /// compatibility with the mirrored framework
    pub fn host(&self) -> Option<String> {
        self.hostname()
    }

    /// Subdomain labels, leftmost-deepest first
    ///
    /// The hostname is split on `.`, reversed, and the first
    /// `subdomain offset` labels (the main domain) dropped. An IP-literal
    /// hostname is treated as a single label.
    pub fn subdomains(&self) -> Vec<String> {
        let Some(hostname) = self.hostname() else {
            return Vec::new();
        };
        let labels: Vec<String> = if hostname.parse::<IpAddr>().is_ok() {
            vec![hostname]
        } else {
            hostname.split('.').rev().map(String::from).collect()
        };
        labels.into_iter().skip(self.subdomain_offset).collect()
    }

    /// Pathname portion of the stored url, query string and fragment
    /// excluded
    pub fn path(&self) -> String {
        match self.url.parse::<Uri>() {
            Ok(uri) => uri.path().to_string(),
            // Fixture urls the Uri type rejects still get the query strip.
            Err(_) => {
                let end = self
                    .url
                    .find(['?', '#'])
                    .unwrap_or(self.url.len());
                self.url[..end].to_string()
            }
        }
    }

    /// True when the client's cached representation is still valid
    ///
    /// Only GET/HEAD requests with a paired response status in 2xx or 304
    /// are candidates; the conditional headers are then compared against
    /// the paired response's outgoing `ETag`/`Last-Modified`.
    pub fn fresh(&self) -> bool {
        if self.method != Method::GET && self.method != Method::HEAD {
            return false;
        }
        let status = self.res.status.as_u16();
        if (200..300).contains(&status) || status == 304 {
            return fresh::is_fresh(&self.headers, &self.res.headers);
        }
        false
    }

    /// Logical negation of [`MockRequest::fresh`]
    pub fn stale(&self) -> bool {
        !self.fresh()
    }

    /// True when `X-Requested-With` equals `XMLHttpRequest`, any casing
    pub fn xhr(&self) -> bool {
        self.get("x-requested-with")
            .map(|value| value.eq_ignore_ascii_case("xmlhttprequest"))
            .unwrap_or(false)
    }
}

impl Default for MockRequest {
    /// A double built entirely from the documented defaults
    fn default() -> Self {
        Self::new(RequestOptions::default())
    }
}
