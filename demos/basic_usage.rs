//! Basic usage: search photos, fetch one by id, search videos.
//!
//! Requires a real API key: `PEXELS_API_KEY=... cargo run --example basic_usage`

use anyhow::Result;
use pexels_rs::{PexelsClient, SearchPhotosParams, SearchVideosParams};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Reads PEXELS_API_KEY from the environment.
    let client = PexelsClient::builder().build()?;

    let photos = client
        .search_photos(SearchPhotosParams::query("mountains").per_page(5))
        .await?;
    println!(
        "found {} photos ({} total matches)",
        photos.photos.len(),
        photos.total_results
    );
    for photo in &photos.photos {
        println!("  #{} by {} - {}", photo.id, photo.photographer, photo.url);
    }

    if let Some(first) = photos.photos.first() {
        let photo = client.get_photo(first.id).await?;
        println!(
            "first photo is {}x{}, original at {:?}",
            photo.width, photo.height, photo.src.original
        );
    }

    let videos = client
        .search_videos(SearchVideosParams::query("ocean").per_page(3))
        .await?;
    println!("found {} videos", videos.videos.len());
    for video in &videos.videos {
        println!("  #{} ({}s) - {}", video.id, video.duration, video.url);
    }

    if let Some(info) = client.last_rate_limit() {
        println!("rate limit remaining: {:?}", info.remaining);
    }

    Ok(())
}
