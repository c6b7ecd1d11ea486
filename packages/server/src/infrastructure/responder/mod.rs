//! Responder implementations.

pub mod http;

pub use http::HttpResponder;
