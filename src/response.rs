//! Paired-response double
//!
//! Just enough of a response object for freshness checks: a status code and
//! the outgoing header map the comparator reads. The headers are a public
//! field on purpose — the double's contract is "outgoing headers live
//! here", not a private field of some framework's response type.

use std::str::FromStr;

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::warn;

use crate::errors::{MockRequestError, MockResult};
use crate::options::ResponseOptions;

/// Response stub paired with a [`crate::MockRequest`]
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    /// Outgoing headers; `ETag` and `Last-Modified` feed freshness checks.
    pub headers: HeaderMap,
}

impl MockResponse {
    /// Create a response stub with a 200 status and no headers
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
        }
    }

    /// Build the stub from fixture overrides, skipping entries the header
    /// types reject rather than failing the whole fixture
    pub(crate) fn from_options(options: ResponseOptions) -> Self {
        let status = match options.status {
            Some(code) => StatusCode::from_u16(code).unwrap_or_else(|_| {
                warn!(status = code, "invalid status in fixture, falling back to 200");
                StatusCode::OK
            }),
            None => StatusCode::OK,
        };

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            crate::request::insert_header(&mut headers, name, value);
        }

        Self { status, headers }
    }

    /// Get an outgoing header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Set an outgoing header
    pub fn set_header<K, V>(&mut self, name: K, value: V) -> MockResult<()>
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
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::new()
    }
}
