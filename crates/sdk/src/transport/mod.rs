//! Transport layer for the Trello SDK.

pub mod http;

pub use http::HttpTransport;
