//! Blocking facade over the async client.
//!
//! There is exactly one implementation of the cache/retry/pagination logic;
//! this module only changes how "suspend" is realized, by driving the async
//! client on an owned current-thread runtime. Backoff sleeps therefore block
//! the calling thread, which is the documented contract of this mode.

use crate::api::{PageParams, PopularVideosParams, SearchPhotosParams, SearchVideosParams};
use crate::request::ApiRequest;
use crate::transport::TransportError;
use crate::types::{Photo, PhotoPage, Video, VideoPage};
use crate::{Error, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Synchronous Pexels API client.
pub struct PexelsClient {
    inner: crate::PexelsClient,
    runtime: Arc<Runtime>,
}

impl PexelsClient {
    /// Build with an API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_builder(crate::PexelsClient::builder().api_key(api_key))
    }

    /// Build from a fully configured async builder.
    pub fn from_builder(builder: crate::PexelsClientBuilder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::Transport(TransportError::Other(format!(
                    "failed to start blocking runtime: {e}"
                )))
            })?;
        Ok(Self {
            inner: builder.build()?,
            runtime: Arc::new(runtime),
        })
    }

    /// Wrap an already-built async client.
    pub fn from_async(inner: crate::PexelsClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::Transport(TransportError::Other(format!(
                    "failed to start blocking runtime: {e}"
                )))
            })?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// Execute one logical request, blocking until it completes.
    pub fn execute(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        self.runtime.block_on(self.inner.execute(request))
    }

    pub fn search_photos(&self, params: SearchPhotosParams) -> Result<PhotoPage> {
        self.runtime.block_on(self.inner.search_photos(params))
    }

    pub fn curated_photos(&self, params: PageParams) -> Result<PhotoPage> {
        self.runtime.block_on(self.inner.curated_photos(params))
    }

    pub fn get_photo(&self, id: u64) -> Result<Photo> {
        self.runtime.block_on(self.inner.get_photo(id))
    }

    pub fn search_videos(&self, params: SearchVideosParams) -> Result<VideoPage> {
        self.runtime.block_on(self.inner.search_videos(params))
    }

    pub fn popular_videos(&self, params: PopularVideosParams) -> Result<VideoPage> {
        self.runtime.block_on(self.inner.popular_videos(params))
    }

    pub fn get_video(&self, id: u64) -> Result<Video> {
        self.runtime.block_on(self.inner.get_video(id))
    }

    pub fn last_rate_limit(&self) -> Option<crate::RateLimitInfo> {
        self.inner.last_rate_limit()
    }

    /// Iterate items across pages, blocking per fetch.
    pub fn paginate(
        &self,
        template: ApiRequest,
        per_page: u32,
        max_items: Option<usize>,
    ) -> PageIter {
        PageIter {
            runtime: self.runtime.clone(),
            pager: self.inner.paginate(template, per_page, max_items),
            buffer: VecDeque::new(),
            done: false,
        }
    }
}

/// Blocking iterator over paginated items.
///
/// Fetches one page at a time through the async paginator; a failure is
/// yielded once as `Err` and the iterator is fused afterwards.
pub struct PageIter {
    runtime: Arc<Runtime>,
    pager: crate::Paginator,
    buffer: VecDeque<serde_json::Value>,
    done: bool,
}

impl PageIter {
    pub fn stats(&self) -> crate::PageStats {
        self.pager.stats()
    }
}

impl Iterator for PageIter {
    type Item = Result<serde_json::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }
            match self.runtime.block_on(self.pager.next_page()) {
                Ok(Some(items)) => self.buffer.extend(items),
                Ok(None) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
