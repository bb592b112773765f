//! Transport layer for the upstream clients.

pub mod http;

pub use http::HttpTransport;
