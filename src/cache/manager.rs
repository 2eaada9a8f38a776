//! Cache manager.

use super::backend::CacheBackend;
use super::key::CacheKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Cache behavior configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to entries written through [`CacheManager::set`].
    pub default_ttl: Duration,
    /// Disable to turn every lookup into a miss without touching the backend.
    pub enabled: bool,
    /// Entries larger than this are silently not cached.
    pub max_entry_size: usize,
    /// Optional namespace prefix, useful when a backend is shared.
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            enabled: true,
            max_entry_size: 10 * 1024 * 1024,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            sets: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// High-level cache access over a [`CacheBackend`].
///
/// All backend errors are demoted here: a failed `get` counts as a miss and a
/// failed `set` is dropped, both logged at WARN. Callers never see a cache
/// failure as an API-call failure.
pub struct CacheManager {
    config: CacheConfig,
    backend: Box<dyn CacheBackend>,
    stats: Arc<AtomicStats>,
}

impl CacheManager {
    pub fn new(config: CacheConfig, backend: Box<dyn CacheBackend>) -> Self {
        Self {
            config,
            backend,
            stats: Arc::new(AtomicStats::new()),
        }
    }

    /// Convenience constructor for the common in-memory setup.
    pub fn memory(max_size: usize, ttl: Duration) -> Self {
        Self::new(
            CacheConfig::new().with_ttl(ttl),
            Box::new(super::MemoryCache::new(max_size)),
        )
    }

    /// Look up a cached value. Expired entries and backend errors both read
    /// as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        if !self.config.enabled {
            return None;
        }
        let prefixed = self.prefix_key(key);
        match self.backend.get(&prefixed).await {
            Ok(Some(data)) => match serde_json::from_slice(&data) {
                Ok(value) => {
                    self.stats.hits.fetch_add(1, Ordering::Relaxed);
                    Some(value)
                }
                Err(e) => {
                    self.stats.errors.fetch_add(1, Ordering::Relaxed);
                    warn!(backend = self.backend.name(), error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                warn!(backend = self.backend.name(), error = %e, "cache get failed, treating as miss");
                None
            }
        }
    }

    /// Store a value under the default TTL.
    pub async fn set<T: Serialize>(&self, key: &CacheKey, value: &T) {
        self.set_with_ttl(key, value, self.config.default_ttl).await
    }

    /// Store a value under an explicit TTL. Oversized values and backend
    /// errors are dropped, not surfaced.
    pub async fn set_with_ttl<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: Duration) {
        if !self.config.enabled {
            return;
        }
        let data = match serde_json::to_vec(value) {
            Ok(data) => data,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "failed to serialize value for caching");
                return;
            }
        };
        if data.len() > self.config.max_entry_size {
            return;
        }
        let prefixed = self.prefix_key(key);
        match self.backend.set(&prefixed, &data, ttl).await {
            Ok(()) => {
                self.stats.sets.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(backend = self.backend.name(), error = %e, "cache set failed, dropping entry");
            }
        }
    }

    /// Remove a single entry. Backend errors are demoted like everywhere
    /// else.
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        if !self.config.enabled {
            return false;
        }
        let prefixed = self.prefix_key(key);
        match self.backend.delete(&prefixed).await {
            Ok(deleted) => deleted,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(backend = self.backend.name(), error = %e, "cache delete failed");
                false
            }
        }
    }

    pub async fn clear(&self) {
        if let Err(e) = self.backend.clear().await {
            self.stats.errors.fetch_add(1, Ordering::Relaxed);
            warn!(backend = self.backend.name(), error = %e, "cache clear failed");
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    fn prefix_key(&self, key: &CacheKey) -> CacheKey {
        match &self.config.key_prefix {
            Some(prefix) => CacheKey::new(format!("{}:{}", prefix, key.as_str())),
            None => key.clone(),
        }
    }
}
