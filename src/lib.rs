//! # mock-http-request
//!
//! An Express-style HTTP request double for unit-testing request-handling
//! logic without a socket or server.
//!
//! [`MockRequest::new`] merges a [`RequestOptions`] fixture over documented
//! defaults (browser-ish headers, an unencrypted `localhost` connection, a
//! 200 paired response) and exposes the read surface of a framework
//! request: case-insensitive header access, content negotiation, byte-range
//! parsing, host/path parsing, and freshness checks against the paired
//! [`MockResponse`].
//!
//! ```
//! use mock_http_request::{MockRequest, RequestOptions};
//!
//! let request = MockRequest::new(
//!     RequestOptions::new()
//!         .header("X-Requested-With", "XMLHttpRequest")
//!         .url("/users?id=7"),
//! );
//!
//! assert!(request.xhr());
//! assert_eq!(request.path(), "/users");
//! assert_eq!(request.get("content-type"), Some("application/json"));
//! assert_eq!(request.accepts(&["html", "json"]), Some("html".to_string()));
//! ```
//!
//! The double is permissive: malformed fixture values are skipped or
//! surface as `None`/sentinel variants from the accessor that reads them,
//! never as construction failures. Proxy-trust logic (`X-Forwarded-*`) is
//! deliberately not implemented.

pub mod content_type;
pub mod errors;
pub mod fresh;
pub mod negotiation;
pub mod options;
pub mod range;
pub mod request;
pub mod response;

pub use content_type::ContentTypeMatch;
pub use errors::{MockRequestError, MockResult};
pub use options::{AppOptions, ConnectionOptions, RequestOptions, ResponseOptions};
pub use range::{ByteRange, ParsedRanges, RangeOutcome};
pub use request::MockRequest;
pub use response::MockResponse;
