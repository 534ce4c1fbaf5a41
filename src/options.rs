//! Fixture configuration for building request doubles
//!
//! Every field is optional; [`crate::MockRequest::new`] merges caller values
//! over the documented defaults key-by-key. The merge is explicit
//! field-by-field construction rather than a generic recursive merge so the
//! resulting state stays auditable from this file alone.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Headers every double starts with, mirroring a typical browser GET.
/// Caller-supplied headers override these per name.
pub(crate) const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Host", "www.localhost.com"),
    ("Content-Type", "application/json"),
    ("Content-Length", "8190"),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Accept-Encoding", "gzip, deflate"),
    ("Connection", "keep-alive"),
    ("Pragma", "no-cache"),
    ("Cache-Control", "no-cache"),
];

pub(crate) const DEFAULT_REMOTE_IP: &str = "localhost";
pub(crate) const DEFAULT_SUBDOMAIN_OFFSET: usize = 2;
pub(crate) const DEFAULT_URL: &str = "/";

/// Connection state presented by the double: the TLS flag and remote address
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConnectionOptions {
    pub encrypted: Option<bool>,
    pub ip: Option<String>,
}

/// Framework-level settings the double honours
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    /// Count of trailing host labels treated as the main domain
    #[serde(alias = "subdomain offset")]
    pub subdomain_offset: Option<usize>,
}

/// Overrides for the paired response double (read only by freshness checks)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseOptions {
    pub status: Option<u16>,
    pub headers: HashMap<String, String>,
}

/// All-optional fixture accepted by [`crate::MockRequest::new`]
///
/// Deserializable so fixtures can be loaded straight from JSON:
///
/// ```
/// use mock_http_request::RequestOptions;
///
/// let options: RequestOptions = serde_json::from_str(
///     r#"{ "url": "/users?id=7", "query": { "id": 7 } }"#,
/// ).unwrap();
/// assert_eq!(options.url.as_deref(), Some("/users?id=7"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub headers: HashMap<String, String>,
    pub connection: ConnectionOptions,
    pub app: AppOptions,
    pub res: ResponseOptions,
    pub query: HashMap<String, Value>,
    pub body: HashMap<String, Value>,
    pub params: HashMap<String, Value>,
    pub cookies: HashMap<String, Value>,
    pub url: Option<String>,
    pub method: Option<String>,
}

impl RequestOptions {
    /// Create an empty fixture (defaults apply for everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a request header (overrides the default of the same name)
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request method
    pub fn method<T: Into<String>>(mut self, method: T) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the raw request url
    pub fn url<T: Into<String>>(mut self, url: T) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add a parsed query-string entry
    pub fn query<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a parsed body entry
    pub fn body_field<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Add a route placeholder value
    pub fn param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a cookie
    pub fn cookie<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.cookies.insert(key.into(), value.into());
        self
    }

    /// Mark the connection as TLS (or not)
    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.connection.encrypted = Some(encrypted);
        self
    }

    /// Set the remote address
    pub fn ip<T: Into<String>>(mut self, ip: T) -> Self {
        self.connection.ip = Some(ip.into());
        self
    }

    /// Set the subdomain offset app setting
    pub fn subdomain_offset(mut self, offset: usize) -> Self {
        self.app.subdomain_offset = Some(offset);
        self
    }

    /// Set the paired response status code
    pub fn response_status(mut self, status: u16) -> Self {
        self.res.status = Some(status);
        self
    }

    /// Set an outgoing header on the paired response
    pub fn response_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.res.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_fields() {
        let options = RequestOptions::new()
            .method("POST")
            .url("/users")
            .header("X-Request-Id", "abc")
            .query("page", 2)
            .body_field("name", "alice")
            .param("id", 7)
            .cookie("session", "s-1")
            .encrypted(true)
            .ip("10.0.0.9")
            .subdomain_offset(3)
            .response_status(304)
            .response_header("ETag", "\"v1\"");

        assert_eq!(options.method.as_deref(), Some("POST"));
        assert_eq!(options.url.as_deref(), Some("/users"));
        assert_eq!(options.headers.get("X-Request-Id").unwrap(), "abc");
        assert_eq!(options.query.get("page").unwrap(), &Value::from(2));
        assert_eq!(options.body.get("name").unwrap(), &Value::from("alice"));
        assert_eq!(options.params.get("id").unwrap(), &Value::from(7));
        assert_eq!(options.cookies.get("session").unwrap(), &Value::from("s-1"));
        assert_eq!(options.connection.encrypted, Some(true));
        assert_eq!(options.connection.ip.as_deref(), Some("10.0.0.9"));
        assert_eq!(options.app.subdomain_offset, Some(3));
        assert_eq!(options.res.status, Some(304));
        assert_eq!(options.res.headers.get("ETag").unwrap(), "\"v1\"");
    }

    #[test]
    fn test_deserializes_express_style_fixture() {
        let options: RequestOptions = serde_json::from_str(
            r#"{
                "headers": { "Host": "demo.localhost.com" },
                "connection": { "encrypted": true },
                "app": { "subdomain offset": 3 },
                "query": { "id": 103 }
            }"#,
        )
        .unwrap();

        assert_eq!(options.headers.get("Host").unwrap(), "demo.localhost.com");
        assert_eq!(options.connection.encrypted, Some(true));
        assert_eq!(options.app.subdomain_offset, Some(3));
        assert_eq!(options.query.get("id").unwrap(), &Value::from(103));
    }
}
