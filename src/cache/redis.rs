//! Redis cache backend (`redis-cache` feature).
//!
//! TTL is passed through to Redis natively (`SET ... EX`), and eviction is
//! whatever the backing server is configured to do; no in-process policy is
//! layered on top. Every connection or command failure maps to
//! [`Error::CacheUnavailable`], which the manager demotes to a miss.

use super::backend::CacheBackend;
use super::key::CacheKey;
use crate::{Error, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use std::time::Duration;
use tokio::sync::Mutex;

/// Networked cache backend delegating storage to a Redis server.
pub struct RedisCache {
    client: redis::Client,
    // Lazily established and reused; dropped on command failure so the next
    // call reconnects.
    connection: Mutex<Option<MultiplexedConnection>>,
}

impl RedisCache {
    /// Connect by host, port and database index. Connection establishment is
    /// lazy, so this cannot fail at construction time on an unreachable
    /// server.
    pub fn new(host: &str, port: u16, db: i64) -> Result<Self> {
        Self::from_url(&format!("redis://{host}:{port}/{db}"))
    }

    /// Connect from a `redis://` URL.
    pub fn from_url(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::CacheUnavailable(format!("invalid redis url: {e}")))?;
        Ok(Self {
            client,
            connection: Mutex::new(None),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut guard = self.connection.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::CacheUnavailable(format!("redis connect failed: {e}")))?;
        *guard = Some(conn.clone());
        Ok(conn)
    }

    async fn forget_connection(&self) {
        *self.connection.lock().await = None;
    }

    async fn run<T: redis::FromRedisValue>(&self, cmd: &redis::Cmd) -> Result<T> {
        let mut conn = self.connection().await?;
        match cmd.query_async(&mut conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.forget_connection().await;
                Err(Error::CacheUnavailable(format!("redis command failed: {e}")))
            }
        }
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        self.run(redis::cmd("GET").arg(key.as_str())).await
    }

    async fn set(&self, key: &CacheKey, value: &[u8], ttl: Duration) -> Result<()> {
        let secs = ttl.as_secs().max(1);
        self.run(redis::cmd("SET").arg(key.as_str()).arg(value).arg("EX").arg(secs))
            .await
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool> {
        let removed: i64 = self.run(redis::cmd("DEL").arg(key.as_str())).await?;
        Ok(removed > 0)
    }

    async fn clear(&self) -> Result<()> {
        self.run(redis::cmd("FLUSHDB")).await
    }

    async fn len(&self) -> Result<usize> {
        let size: i64 = self.run(redis::cmd("DBSIZE")).await?;
        Ok(size.max(0) as usize)
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
