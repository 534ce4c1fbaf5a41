//! The request double and its accessor surface

mod request;

pub use request::MockRequest;

pub(crate) use request::insert_header;
