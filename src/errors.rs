//! Error types for the request double
//!
//! The double is permissive by design: malformed fixture data surfaces as
//! `None` or a sentinel variant from the accessor that trips over it, never
//! as a construction failure. The fallible surface is limited to the
//! explicit mutation seams below.

use thiserror::Error;

/// Result type for fallible mock request operations
pub type MockResult<T> = Result<T, MockRequestError>;

/// Errors from the explicitly fallible parts of the double
#[derive(Error, Debug)]
pub enum MockRequestError {
    #[error("Invalid header name: {name}")]
    InvalidHeaderName { name: String },

    #[error("Invalid header value for {name}: {message}")]
    InvalidHeaderValue { name: String, message: String },

    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },
}

impl MockRequestError {
    /// Create an invalid header name error
    pub fn invalid_header_name<T: Into<String>>(name: T) -> Self {
        MockRequestError::InvalidHeaderName { name: name.into() }
    }

    /// Create an invalid header value error
    pub fn invalid_header_value<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        MockRequestError::InvalidHeaderValue {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid method error
    pub fn invalid_method<T: Into<String>>(method: T) -> Self {
        MockRequestError::InvalidMethod {
            method: method.into(),
        }
    }
}
