//! Logical requests: an endpoint plus its query parameters, independent of
//! any transport concern.

use std::collections::BTreeMap;

use crate::cache::CacheKey;

/// The Pexels endpoint families the client knows how to call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SearchPhotos,
    CuratedPhotos,
    Photo(u64),
    SearchVideos,
    PopularVideos,
    Video(u64),
}

impl Endpoint {
    /// URL path relative to the API host.
    pub fn path(&self) -> String {
        match self {
            Endpoint::SearchPhotos => "/v1/search".to_string(),
            Endpoint::CuratedPhotos => "/v1/curated".to_string(),
            Endpoint::Photo(id) => format!("/v1/photos/{id}"),
            Endpoint::SearchVideos => "/videos/search".to_string(),
            Endpoint::PopularVideos => "/videos/popular".to_string(),
            Endpoint::Video(id) => format!("/videos/videos/{id}"),
        }
    }

    /// Key under which this endpoint's paged responses carry their items.
    pub fn items_key(&self) -> &'static str {
        match self {
            Endpoint::SearchPhotos | Endpoint::CuratedPhotos | Endpoint::Photo(_) => "photos",
            Endpoint::SearchVideos | Endpoint::PopularVideos | Endpoint::Video(_) => "videos",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// A logical API request: endpoint identifier plus query parameters.
///
/// Immutable once built. Parameters are kept in a `BTreeMap` so the derived
/// cache key is independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    endpoint: Endpoint,
    params: BTreeMap<String, String>,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: BTreeMap::new(),
        }
    }

    /// Add a query parameter. Empty values are dropped, matching the
    /// provider's expectation that absent and empty parameters behave the
    /// same.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.params.insert(name.into(), value);
        }
        self
    }

    /// Add an optional query parameter; `None` and empty values are dropped.
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(name, v),
            None => self,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Read a single parameter back, mainly useful for the paginator which
    /// rewrites `page`/`per_page`.
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// Derive the deterministic cache key for this request.
    ///
    /// The key is a pure function of endpoint path and sorted parameters:
    /// the same logical request always maps to the same key.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_request("GET", &self.endpoint.path(), &self.params)
    }
}
