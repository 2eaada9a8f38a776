//! Request execution core.

use crate::cache::CacheManager;
use crate::error::classify_response;
use crate::request::ApiRequest;
use crate::retry::{Decision, RetryConfig};
use crate::transport::{Transport, TransportResponse};
use crate::{Error, Result};
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Most recent rate-limit headers reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// `X-Ratelimit-Limit`: the monthly request quota.
    pub limit: Option<u64>,
    /// `X-Ratelimit-Remaining`: requests left in the current window.
    pub remaining: Option<u64>,
    /// `X-Ratelimit-Reset`: UNIX timestamp when the quota resets.
    pub reset: Option<u64>,
}

/// Asynchronous Pexels API client.
///
/// Cheap to clone: all state is behind `Arc`s, so clones share the transport
/// pool, the cache and the rate-limit bookkeeping.
#[derive(Clone)]
pub struct PexelsClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) cache: Option<Arc<CacheManager>>,
    pub(crate) retry: RetryConfig,
    pub(crate) inflight: Option<Arc<Semaphore>>,
    pub(crate) rate_limit: Arc<RwLock<Option<RateLimitInfo>>>,
}

impl PexelsClient {
    /// Start building a client.
    pub fn builder() -> super::PexelsClientBuilder {
        super::PexelsClientBuilder::new()
    }

    /// Convenience constructor with default retry policy and no cache.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Rate-limit headers observed on the most recent transport response,
    /// if any response carried them.
    pub fn last_rate_limit(&self) -> Option<RateLimitInfo> {
        self.rate_limit.read().ok().and_then(|guard| guard.clone())
    }

    /// Cache counters, when a cache is configured.
    pub fn cache_stats(&self) -> Option<crate::cache::CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Execute one logical request and return the decoded JSON payload.
    ///
    /// Flow: cache lookup (a hit returns immediately with zero transport
    /// calls), then an attempt loop of transport call, status
    /// classification and policy-driven backoff. Successful payloads are
    /// written to the cache exactly once, after full decoding, so an
    /// abandoned call never leaves a partial entry behind.
    pub async fn execute(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        let key = request.cache_key();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get::<serde_json::Value>(&key).await {
                debug!(endpoint = %request.endpoint(), "cache hit");
                return Ok(hit);
            }
        }

        // Backpressure: bound the number of in-flight calls when configured.
        let _permit = match &self.inflight {
            Some(semaphore) => Some(
                semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("in-flight semaphore is never closed"),
            ),
            None => None,
        };

        let request_id = Uuid::new_v4().to_string();
        let mut attempt: u32 = 1;
        loop {
            match self.execute_once(request, &request_id).await {
                Ok(value) => {
                    if let Some(cache) = &self.cache {
                        cache.set(&key, &value).await;
                    }
                    return Ok(value);
                }
                Err(err) => match self.retry.decide(&err, attempt) {
                    Decision::Retry { delay } => {
                        info!(
                            endpoint = %request.endpoint(),
                            request_id = request_id.as_str(),
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "retrying after backoff"
                        );
                        // Suspends only this task; concurrent calls proceed.
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    Decision::Fail => return Err(err),
                },
            }
        }
    }

    /// One transport attempt: no cache, no retry.
    async fn execute_once(
        &self,
        request: &ApiRequest,
        request_id: &str,
    ) -> Result<serde_json::Value> {
        let path = request.endpoint().path();
        let query: Vec<(String, String)> = request
            .params()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let headers = [("X-Client-Request-Id".to_string(), request_id.to_string())];

        let start = Instant::now();
        let response = self
            .transport
            .call("GET", &path, &query, &headers)
            .await
            .map_err(Error::Transport)?;

        self.record_rate_limit(&response);

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            let err = classify_response(response.status, &response.headers, &body);
            info!(
                http_status = response.status,
                endpoint = path.as_str(),
                request_id,
                duration_ms = start.elapsed().as_millis() as u64,
                error = %err,
                "pexels request failed"
            );
            return Err(err);
        }

        debug!(
            http_status = response.status,
            endpoint = path.as_str(),
            request_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "pexels request succeeded"
        );

        serde_json::from_slice(&response.body).map_err(Error::Decode)
    }

    fn record_rate_limit(&self, response: &TransportResponse) {
        let info = RateLimitInfo {
            limit: parse_header(response, "X-Ratelimit-Limit"),
            remaining: parse_header(response, "X-Ratelimit-Remaining"),
            reset: parse_header(response, "X-Ratelimit-Reset"),
        };
        if info == RateLimitInfo::default() {
            return;
        }
        match self.rate_limit.write() {
            Ok(mut guard) => *guard = Some(info),
            Err(e) => warn!(error = %e, "rate-limit bookkeeping lock poisoned"),
        }
    }
}

fn parse_header(response: &TransportResponse, name: &str) -> Option<u64> {
    response.header(name).and_then(|v| v.trim().parse().ok())
}
