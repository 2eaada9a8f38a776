//! Client builder.

use crate::cache::CacheManager;
use crate::retry::RetryConfig;
use crate::transport::{HttpTransport, Transport};
use crate::{Error, Result};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::Semaphore;

use super::core::PexelsClient;

/// Builder for [`PexelsClient`].
///
/// Keep this surface area small and predictable. The API key may come from
/// the `PEXELS_API_KEY` environment variable when not set explicitly.
pub struct PexelsClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    retry: RetryConfig,
    cache: Option<CacheManager>,
    max_inflight: Option<usize>,
    transport: Option<Arc<dyn Transport>>,
}

impl PexelsClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: None,
            retry: RetryConfig::default(),
            cache: None,
            max_inflight: None,
            transport: None,
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API host (primarily for testing with mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request transport timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Attach a response cache.
    pub fn cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Shorthand for an in-memory LRU cache with the given size and TTL.
    pub fn memory_cache(mut self, max_size: usize, ttl: Duration) -> Self {
        self.cache = Some(CacheManager::memory(max_size, ttl));
        self
    }

    /// Limit the number of in-flight requests. A simple backpressure
    /// mechanism for production safety.
    pub fn max_inflight(mut self, n: usize) -> Self {
        self.max_inflight = Some(n.max(1));
        self
    }

    /// Inject a custom transport, bypassing the reqwest implementation.
    /// This is the seam the test suite uses for scripted responses.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<PexelsClient> {
        self.retry.validate()?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let api_key = self
                    .api_key
                    .or_else(|| std::env::var("PEXELS_API_KEY").ok())
                    .ok_or_else(|| Error::AuthFailure {
                        status: 0,
                        message: "no API key: pass one to the builder or set PEXELS_API_KEY"
                            .to_string(),
                    })?;
                let mut builder = HttpTransport::builder(api_key);
                if let Some(base_url) = self.base_url {
                    builder = builder.base_url(base_url);
                }
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                Arc::new(builder.build()?)
            }
        };

        Ok(PexelsClient {
            transport,
            cache: self.cache.map(Arc::new),
            retry: self.retry,
            inflight: self.max_inflight.map(|n| Arc::new(Semaphore::new(n))),
            rate_limit: Arc::new(RwLock::new(None)),
        })
    }
}

impl Default for PexelsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
