//! Cache backend implementations.

use super::key::CacheKey;
use crate::Result;
use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CacheEntry {
    data: Vec<u8>,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(data: Vec<u8>, ttl: Duration) -> Self {
        Self {
            data,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// A pluggable key-value store for cached responses.
///
/// Backends store opaque bytes; serialization and TTL defaults live in the
/// [`super::CacheManager`]. Implementations must be safe for concurrent use
/// from multiple in-flight requests.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()>;
    async fn delete(&self, key: &CacheKey) -> Result<bool>;
    async fn clear(&self) -> Result<()>;
    async fn len(&self) -> Result<usize>;
    fn name(&self) -> &'static str;
}

/// Bounded in-process cache with LRU eviction and lazy TTL expiry.
///
/// Recency is access order, not insertion order: a `get` that hits refreshes
/// the entry, so inserting past capacity evicts the least-recently-used key.
/// Expired entries are treated as absent on read; no background sweep runs.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create a cache holding at most `max_size` entries (minimum 1).
    pub fn new(max_size: usize) -> Self {
        let cap = NonZeroUsize::new(max_size.max(1)).expect("max(1) is non-zero");
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let mut entries = self.entries.lock().unwrap();
        // `LruCache::get` promotes the entry to most-recently-used.
        match entries.get(key.as_str()) {
            Some(entry) if entry.is_expired() => {
                entries.pop(key.as_str());
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.data.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.put(key.as_str().to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.lock().unwrap().pop(key.as_str()).is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.iter().filter(|(_, e)| !e.is_expired()).count())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// No-op cache used when caching is disabled.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for NullCache {
    async fn get(&self, _: &CacheKey) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }
    async fn set(&self, _: &CacheKey, _: &[u8], _: Duration) -> Result<()> {
        Ok(())
    }
    async fn delete(&self, _: &CacheKey) -> Result<bool> {
        Ok(false)
    }
    async fn clear(&self) -> Result<()> {
        Ok(())
    }
    async fn len(&self) -> Result<usize> {
        Ok(0)
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
