//! HTTP server wiring

pub mod http;

pub use http::*;
