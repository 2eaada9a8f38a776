//! Typed endpoint glue: parameter builders and decoding for the individual
//! Pexels endpoints.
//!
//! Everything here is thin plumbing over [`crate::PexelsClient::execute`];
//! the resilience behavior (caching, retries, pagination) lives below this
//! layer and is identical for every endpoint.

mod photos;
mod videos;

pub use photos::SearchPhotosParams;
pub use videos::{PopularVideosParams, SearchVideosParams};

use crate::request::ApiRequest;

/// Plain page/per_page parameters for endpoints without filters
/// (curated photos).
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .param_opt("page", self.page)
            .param_opt("per_page", self.per_page)
    }
}
