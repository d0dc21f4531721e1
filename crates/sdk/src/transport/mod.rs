//! Transport layer for the Pennylane SDK.

pub mod http;

pub use http::HttpTransport;
