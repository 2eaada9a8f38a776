//! Lazy pagination over the stateless paged endpoints.
//!
//! A [`Paginator`] repeatedly drives [`crate::PexelsClient::execute`] with an
//! advancing page cursor, so every page fetch gets the full cache/retry
//! treatment. Page n+1 is never requested before page n completes; the
//! traversal is restartable by constructing a fresh paginator with the same
//! template.

use crate::request::ApiRequest;
use crate::{BoxStream, Result};
use futures::TryStreamExt;
use tracing::debug;

/// Provider-documented maximum page size.
pub const MAX_PER_PAGE: u32 = 80;

/// Position in a paged traversal. Advances by one per successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// 1-indexed page number.
    pub page: u32,
    /// Page size, clamped to [`MAX_PER_PAGE`] before the first fetch.
    pub per_page: u32,
}

impl PageCursor {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageState {
    Ready,
    Exhausted,
    Failed,
}

/// Traversal counters, mirroring what callers could observe from the
/// original iterator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStats {
    pub current_page: u32,
    pub per_page: u32,
    pub pages_fetched: usize,
    pub items_yielded: usize,
    pub total_results: Option<u64>,
    pub max_items: Option<usize>,
}

/// Lazy, restartable sequence of items over a paged endpoint.
///
/// Terminates when a fetched page is short (fewer items than `per_page`),
/// when the provider stops supplying a `next_page` link, or when `max_items`
/// caps the yield. A failure propagates once on the pull that triggered it
/// and fuses the sequence; items already yielded stay valid.
pub struct Paginator {
    client: crate::PexelsClient,
    template: ApiRequest,
    cursor: PageCursor,
    max_items: Option<usize>,
    state: PageState,
    pages_fetched: usize,
    items_yielded: usize,
    total_results: Option<u64>,
}

impl Paginator {
    pub(crate) fn new(
        client: crate::PexelsClient,
        template: ApiRequest,
        per_page: u32,
        max_items: Option<usize>,
    ) -> Self {
        let start_page = template
            .get_param("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(1);
        Self {
            client,
            template,
            cursor: PageCursor::new(start_page, per_page),
            max_items,
            state: PageState::Ready,
            pages_fetched: 0,
            items_yielded: 0,
            total_results: None,
        }
    }

    pub fn stats(&self) -> PageStats {
        PageStats {
            current_page: self.cursor.page,
            per_page: self.cursor.per_page,
            pages_fetched: self.pages_fetched,
            items_yielded: self.items_yielded,
            total_results: self.total_results,
            max_items: self.max_items,
        }
    }

    fn remaining_quota(&self) -> Option<usize> {
        self.max_items.map(|cap| cap.saturating_sub(self.items_yielded))
    }

    /// Fetch the next page and return its (possibly cap-truncated) items.
    /// `Ok(None)` means the sequence is exhausted; the call is fused after
    /// exhaustion or failure.
    pub async fn next_page(&mut self) -> Result<Option<Vec<serde_json::Value>>> {
        if self.state != PageState::Ready {
            return Ok(None);
        }
        if self.remaining_quota() == Some(0) {
            self.state = PageState::Exhausted;
            return Ok(None);
        }

        let request = self
            .template
            .clone()
            .param("page", self.cursor.page)
            .param("per_page", self.cursor.per_page);

        let json = match self.client.execute(&request).await {
            Ok(json) => json,
            Err(err) => {
                self.state = PageState::Failed;
                return Err(err);
            }
        };

        self.pages_fetched += 1;
        if let Some(total) = json.get("total_results").and_then(|v| v.as_u64()) {
            self.total_results = Some(total);
        }

        let mut items = json
            .get(self.template.endpoint().items_key())
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let fetched = items.len();
        let has_next = json.get("next_page").map(|v| !v.is_null()).unwrap_or(false);
        let short_page = fetched < self.cursor.per_page as usize;

        // Enforce the item cap: truncate the last page, never fetch past it.
        if let Some(remaining) = self.remaining_quota() {
            if fetched >= remaining {
                items.truncate(remaining);
                self.state = PageState::Exhausted;
            }
        }

        if self.state == PageState::Ready {
            if short_page || !has_next {
                self.state = PageState::Exhausted;
            } else {
                self.cursor.page += 1;
            }
        }

        self.items_yielded += items.len();
        debug!(
            page = self.cursor.page,
            fetched,
            yielded = items.len(),
            exhausted = self.state == PageState::Exhausted,
            "fetched page"
        );

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(items))
    }

    /// Adapt the paginator into a lazy stream of individual items.
    pub fn into_stream(self) -> BoxStream<'static, serde_json::Value> {
        let stream = futures::stream::try_unfold(self, |mut pager| async move {
            match pager.next_page().await? {
                Some(items) => {
                    let page = futures::stream::iter(items.into_iter().map(crate::Result::Ok));
                    Ok::<_, crate::Error>(Some((page, pager)))
                }
                None => Ok(None),
            }
        })
        .try_flatten();
        Box::pin(stream)
    }
}

impl crate::PexelsClient {
    /// Build a lazy page traversal from a request template. The template's
    /// `page`/`per_page` parameters are managed by the paginator; `per_page`
    /// is clamped to the provider maximum of 80.
    pub fn paginate(
        &self,
        template: ApiRequest,
        per_page: u32,
        max_items: Option<usize>,
    ) -> Paginator {
        Paginator::new(self.clone(), template, per_page, max_items)
    }
}
