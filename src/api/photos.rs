//! Photo endpoints.

use super::PageParams;
use crate::request::{ApiRequest, Endpoint};
use crate::types::{Photo, PhotoPage};
use crate::{BoxStream, Error, PexelsClient, Result};
use futures::StreamExt;

/// Parameters for `GET /v1/search`.
#[derive(Debug, Clone)]
pub struct SearchPhotosParams {
    pub query: String,
    pub orientation: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub locale: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchPhotosParams {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            orientation: None,
            size: None,
            color: None,
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

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
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
        ApiRequest::new(Endpoint::SearchPhotos)
            .param("query", self.query)
            .param_opt("orientation", self.orientation)
            .param_opt("size", self.size)
            .param_opt("color", self.color)
            .param_opt("locale", self.locale)
            .param_opt("page", self.page)
            .param_opt("per_page", self.per_page)
    }
}

impl PexelsClient {
    /// Search photos by query.
    pub async fn search_photos(&self, params: SearchPhotosParams) -> Result<PhotoPage> {
        let value = self.execute(&params.into_request()).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Fetch the curated photo feed.
    pub async fn curated_photos(&self, params: PageParams) -> Result<PhotoPage> {
        let request = params.apply(ApiRequest::new(Endpoint::CuratedPhotos));
        let value = self.execute(&request).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Fetch a single photo by id.
    pub async fn get_photo(&self, id: u64) -> Result<Photo> {
        let value = self.execute(&ApiRequest::new(Endpoint::Photo(id))).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    /// Lazily iterate individual photos matching a search, across pages,
    /// up to `max_items`.
    pub fn search_photos_stream(
        &self,
        params: SearchPhotosParams,
        max_items: Option<usize>,
    ) -> BoxStream<'static, Photo> {
        let per_page = params.per_page.unwrap_or(15);
        let pager = self.paginate(params.into_request(), per_page, max_items);
        Box::pin(pager.into_stream().map(|item| {
            item.and_then(|value| serde_json::from_value(value).map_err(Error::Decode))
        }))
    }

    /// Lazily iterate the curated feed, across pages, up to `max_items`.
    pub fn curated_photos_stream(
        &self,
        params: PageParams,
        max_items: Option<usize>,
    ) -> BoxStream<'static, Photo> {
        let per_page = params.per_page.unwrap_or(15);
        let template = params.apply(ApiRequest::new(Endpoint::CuratedPhotos));
        let pager = self.paginate(template, per_page, max_items);
        Box::pin(pager.into_stream().map(|item| {
            item.and_then(|value| serde_json::from_value(value).map_err(Error::Decode))
        }))
    }
}
