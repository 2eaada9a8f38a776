//! Transport contract: the single seam between the resilience core and the
//! network.
//!
//! The core never constructs sockets; it hands a method, path, query set and
//! headers to a [`Transport`] and gets back a status, headers and body (or a
//! transport-level failure). Blocking and concurrent clients, as well as the
//! scripted fakes in the test suite, are interchangeable implementations of
//! this one trait.

mod http;

pub use http::{HttpTransport, HttpTransportBuilder};

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// One raw HTTP-shaped response, before any classification or decoding.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Executes one literal network call.
///
/// Implementations may impose their own connection-pooling or concurrency
/// limits; the core treats a slow transport as backpressure, not an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<TransportResponse, TransportError>;
}

/// Failures below the HTTP status level: the call never produced a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}
