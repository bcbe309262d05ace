//! HTTP client layer: `SmjHttp`, one request per call.

pub mod client;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::SmjHttp;
