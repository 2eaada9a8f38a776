//! Error taxonomy for the Pexels client.
//!
//! Every failure a caller can observe from [`crate::PexelsClient`] is one of
//! the variants below. Classification from raw HTTP responses happens in
//! [`classify_response`]; the retry loop only ever re-dispatches
//! [`Error::RateLimited`] (and, when explicitly configured, transport and
//! server failures).

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub use crate::transport::TransportError;

/// Unified error type for the Pexels client.
#[derive(Debug, Error)]
pub enum Error {
    /// 401/403: invalid or missing API key. Never retried.
    #[error("authentication failed (HTTP {status}): {message}")]
    AuthFailure { status: u16, message: String },

    /// 400/422: the provider rejected the request parameters. Never retried.
    #[error("bad request (HTTP {status}): {message}")]
    BadRequest { status: u16, message: String },

    /// 404: the resource does not exist. Never retried.
    #[error("resource not found (HTTP {status}): {message}")]
    NotFound { status: u16, message: String },

    /// 429: the provider signalled a rate limit. Retried per
    /// [`crate::RetryConfig`] until exhausted.
    #[error("rate limited (HTTP {status}): {message}")]
    RateLimited {
        status: u16,
        message: String,
        /// Server-provided `Retry-After` hint, when present.
        retry_after: Option<Duration>,
    },

    /// 5xx: provider-side failure. Surfaced immediately unless
    /// `retry_server_errors` is enabled.
    #[error("server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// The transport adapter could not complete the call at all
    /// (connection refused, timeout, TLS failure, ...).
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A cache backend errored. Never surfaced from `execute`/`paginate`;
    /// the cache manager demotes this to a miss and logs it.
    #[error("cache backend unavailable: {0}")]
    CacheUnavailable(String),

    /// The response body was not the JSON we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::AuthFailure { status, .. }
            | Error::BadRequest { status, .. }
            | Error::NotFound { status, .. }
            | Error::RateLimited { status, .. }
            | Error::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided retry-after hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Whether this is the rate-limit variant, the only failure retried by
    /// the default policy.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited { .. })
    }
}

/// Classify a non-success HTTP response into a typed error.
///
/// The message is taken from the JSON body's `error` field when present,
/// falling back to the raw body text.
pub fn classify_response(status: u16, headers: &HashMap<String, String>, body: &str) -> Error {
    let message = extract_error_message(body);
    match status {
        400 | 422 => Error::BadRequest { status, message },
        401 | 403 => Error::AuthFailure { status, message },
        404 => Error::NotFound { status, message },
        429 => Error::RateLimited {
            status,
            message,
            retry_after: parse_retry_after(headers),
        },
        s if s >= 500 => Error::ServerError { status, message },
        // Unmapped 4xx: treat as bad request so it is never retried.
        _ => Error::BadRequest { status, message },
    }
}

fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a `Retry-After` header value in seconds.
///
/// Accepts integral and fractional second counts; HTTP-date forms are not
/// used by Pexels and are ignored.
pub(crate) fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
    let raw = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("retry-after"))
        .map(|(_, v)| v.trim())?;
    if let Ok(secs) = raw.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(Duration::from_secs_f64)
}
