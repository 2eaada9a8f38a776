//! Response caching with pluggable backends.
//!
//! Caching sits in front of the transport: a hit short-circuits the whole
//! retry loop and costs zero network calls. Backends are deliberately dumb
//! byte stores; TTL bookkeeping, LRU eviction and error demotion live in the
//! backend/manager pair.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheManager`] | High-level cache access with stats and error demotion |
//! | [`CacheConfig`] | TTL, size limits and enable switch |
//! | [`CacheBackend`] | Trait for implementing custom backends |
//! | [`MemoryCache`] | Bounded in-process LRU cache |
//! | [`RedisCache`] | Networked backend (`redis-cache` feature) |
//! | [`NullCache`] | No-op backend for disabling caching |
//! | [`CacheKey`] | Deterministic key derived from a logical request |
//!
//! Cache failures are a resilience boundary, not call failures: the manager
//! demotes any backend error to a miss and logs it, so a dead Redis never
//! fails an API call that the network could still serve.

mod backend;
mod key;
mod manager;

#[cfg(feature = "redis-cache")]
mod redis;

pub use backend::{CacheBackend, MemoryCache, NullCache};
pub use key::CacheKey;
pub use manager::{CacheConfig, CacheManager, CacheStats};

#[cfg(feature = "redis-cache")]
pub use self::redis::RedisCache;
