//! Video endpoints.

use crate::request::{ApiRequest, Endpoint};
use crate::types::{Video, VideoPage};
use crate::{BoxStream, Error, PexelsClient, Result};
use futures::StreamExt;

/// Parameters for `GET /videos/search`.
#[derive(Debug, Clone)]
pub struct SearchVideosParams {
    pub query: String,
    pub orientation: Option<String>,
    pub size: Option<String>,
    pub locale: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchVideosParams {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            orientation: None,
            size: None,
            locale: None,
            page: None,
            per_page: None,
        }
    }

    pub fn orientation(mut self, orientation: impl Into<String>) -> Self {
        self.orientation = Some(orientation.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub(crate) fn into_request(self) -> ApiRequest {
        ApiRequest::new(Endpoint::SearchVideos)
            .param("query", self.query)
            .param_opt("orientation", self.orientation)
            .param_opt("size", self.size)
            .param_opt("locale", self.locale)
            .param_opt("page", self.page)
            .param_opt("per_page", self.per_page)
    }
}

/// Parameters for `GET /videos/popular`.
#[derive(Debug, Clone, Default)]
pub struct PopularVideosParams {
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PopularVideosParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_width(mut self, v: u32) -> Self {
        self.min_width = Some(v);
        self
    }

    pub fn min_height(mut self, v: u32) -> Self {
        self.min_height = Some(v);
        self
    }

    pub fn min_duration(mut self, v: u32) -> Self {
        self.min_duration = Some(v);
        self
    }

    pub fn max_duration(mut self, v: u32) -> Self {
        self.max_duration = Some(v);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub(crate) fn into_request(self) -> ApiRequest {
        ApiRequest::new(Endpoint::PopularVideos)
            .param_opt("min_width", self.min_width)
            .param_opt("min_height", self.min_height)
            .param_opt("min_duration", self.min_duration)
            .param_opt("max_duration", self.max_duration)
            .param_opt("page", self.page)
            .param_opt("per_page", self.per_page)
    }
}

impl PexelsClient {
    /// Search videos by query.
    pub async fn search_videos(&self, params: SearchVideosParams) -> Result<VideoPage> {
        let value = self.execute(&params.into_request()).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Fetch the popular video feed.
    pub async fn popular_videos(&self, params: PopularVideosParams) -> Result<VideoPage> {
        let value = self.execute(&params.into_request()).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Fetch a single video by id.
    pub async fn get_video(&self, id: u64) -> Result<Video> {
        let value = self.execute(&ApiRequest::new(Endpoint::Video(id))).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Lazily iterate individual videos matching a search, across pages,
    /// up to `max_items`.
    pub fn search_videos_stream(
        &self,
        params: SearchVideosParams,
        max_items: Option<usize>,
    ) -> BoxStream<'static, Video> {
        let per_page = params.per_page.unwrap_or(15);
        let pager = self.paginate(params.into_request(), per_page, max_items);
        Box::pin(pager.into_stream().map(|item| {
            item.and_then(|value| serde_json::from_value(value).map_err(Error::Decode))
        }))
    }
}
