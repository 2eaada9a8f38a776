//! Configure backoff and caching, then observe cache hits.
//!
//! Requires a real API key:
//! `PEXELS_API_KEY=... cargo run --example retry_and_cache`

use anyhow::Result;
use pexels_rs::{PexelsClient, RetryConfig, SearchPhotosParams};
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let retry = RetryConfig::new()
        .with_max_retries(5)
        .with_base_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(30));

    let client = PexelsClient::builder()
        .retry_config(retry)
        .memory_cache(500, Duration::from_secs(300))
        .build()?;

    let params = SearchPhotosParams::query("city").per_page(10);

    let start = Instant::now();
    let first = client.search_photos(params.clone()).await?;
    println!(
        "first call: {} photos in {:?}",
        first.photos.len(),
        start.elapsed()
    );

    let start = Instant::now();
    let second = client.search_photos(params).await?;
    println!(
        "second call: {} photos in {:?} (served from cache)",
        second.photos.len(),
        start.elapsed()
    );

    if let Some(stats) = client.cache_stats() {
        println!(
            "cache: {} hits, {} misses, {} sets ({:.0}% hit ratio)",
            stats.hits,
            stats.misses,
            stats.sets,
            stats.hit_ratio() * 100.0
        );
    }
    if let Some(info) = client.last_rate_limit() {
        println!("rate limit remaining: {:?}", info.remaining);
    }

    Ok(())
}
