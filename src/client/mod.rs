//! Pexels client: builder, request execution loop and rate-limit
//! bookkeeping.
//!
//! [`PexelsClient::execute`] is the resilience core: cache lookup, transport
//! call, status classification, backoff-retry on rate limits and a single
//! cache write on success. The typed endpoint methods in [`crate::api`] are
//! thin wrappers over it.

mod builder;
mod core;

pub use builder::PexelsClientBuilder;
pub use core::{PexelsClient, RateLimitInfo};
