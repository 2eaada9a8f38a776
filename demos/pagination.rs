//! Lazy pagination: stream items across pages without fetching ahead.
//!
//! Requires a real API key: `PEXELS_API_KEY=... cargo run --example pagination`

use anyhow::Result;
use futures::TryStreamExt;
use pexels_rs::request::{ApiRequest, Endpoint};
use pexels_rs::{PexelsClient, SearchPhotosParams};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = PexelsClient::builder().build()?;

    // Typed stream: at most 25 photos, fetched 10 at a time, pages pulled
    // only as the stream is consumed.
    let mut count = 0usize;
    let mut photos = client.search_photos_stream(
        SearchPhotosParams::query("forest").per_page(10),
        Some(25),
    );
    while let Some(photo) = photos.try_next().await? {
        count += 1;
        println!("{count:>3}. #{} by {}", photo.id, photo.photographer);
    }
    println!("streamed {count} photos");

    // Page-at-a-time traversal with stats, over the raw request template.
    let template = ApiRequest::new(Endpoint::SearchVideos).param("query", "rain");
    let mut pager = client.paginate(template, 5, Some(15));
    while let Some(items) = pager.next_page().await? {
        println!("got a page of {} videos", items.len());
    }
    let stats = pager.stats();
    println!(
        "fetched {} pages, {} items, {:?} total matches",
        stats.pages_fetched, stats.items_yielded, stats.total_results
    );

    Ok(())
}
