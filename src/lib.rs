//! # pexels-rs
//!
//! A resilient Rust client for the [Pexels](https://www.pexels.com/api/)
//! photo and video API.
//!
//! ## Overview
//!
//! The library is built around a small resilience core that every endpoint
//! call flows through:
//!
//! - **Caching**: pluggable response cache with TTL expiry and bounded LRU
//!   eviction via the [`cache`] module (in-memory by default, Redis behind
//!   the `redis-cache` feature)
//! - **Retry**: exponential backoff with optional full jitter for
//!   rate-limited requests via [`retry`]
//! - **Pagination**: lazy, restartable page traversal via [`pagination`]
//! - **Transport abstraction**: the [`transport::Transport`] trait isolates
//!   the HTTP layer so tests and alternative clients can swap it out
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pexels_rs::{PexelsClient, SearchPhotosParams};
//!
//! #[tokio::main]
//! async fn main() -> pexels_rs::Result<()> {
//!     let client = PexelsClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let page = client
//!         .search_photos(SearchPhotosParams::query("mountains").per_page(10))
//!         .await?;
//!     for photo in &page.photos {
//!         println!("{} by {}", photo.url, photo.photographer);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! A blocking facade over the same core lives in [`blocking`].
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and the request execution loop |
//! | [`request`] | Logical requests, endpoints and cache keys |
//! | [`cache`] | Response caching with pluggable backends |
//! | [`retry`] | Retry policy and backoff delay computation |
//! | [`pagination`] | Lazy page traversal over paged endpoints |
//! | [`transport`] | HTTP transport contract and reqwest implementation |
//! | [`types`] | Decoded payload types (photos, videos, pages) |
//! | [`api`] | Typed parameter builders for individual endpoints |
//! | [`blocking`] | Synchronous facade over the async client |

pub mod api;
pub mod blocking;
pub mod cache;
pub mod client;
pub mod pagination;
pub mod request;
pub mod retry;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use api::{PopularVideosParams, SearchPhotosParams, SearchVideosParams};
pub use client::{PexelsClient, PexelsClientBuilder, RateLimitInfo};
pub use pagination::{PageCursor, PageStats, Paginator};
pub use request::{ApiRequest, Endpoint};
pub use retry::RetryConfig;
pub use types::{Photo, PhotoPage, Video, VideoPage};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A pinned, boxed stream of fallible items
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::Error;
