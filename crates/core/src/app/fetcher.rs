//! Turns cursor state into backend page
//! requests and backend pages into feed
//! entries.

use std::sync::Arc;

use crate::domain::error::ErrorKind;
use crate::domain::list_store::PageCursor;
use crate::domain::load_state::LoadKind;
use crate::domain::model::{
  FeedEntry,
  FeedPage,
  PostPage
};
use crate::ports::blog_api::BlogApi;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PageRequest {
  pub page: u32,
  pub size: u32
}

impl PageRequest {
  pub fn for_load(
    cursor: PageCursor,
    kind: LoadKind
  ) -> Self {
    let page = match kind {
      | LoadKind::Initial => 0,
      | LoadKind::More => {
        cursor.current_page
      }
    };
    Self {
      page,
      size: cursor.page_size
    }
  }
}

#[derive(Clone)]
pub struct FeedFetcher {
  api: Arc<dyn BlogApi>
}

impl FeedFetcher {
  pub fn new(
    api: Arc<dyn BlogApi>
  ) -> Self {
    Self { api }
  }

  /// One attempt, no retry.
  pub fn fetch_page(
    &self,
    request: PageRequest
  ) -> Result<FeedPage, ErrorKind> {
    self
      .api
      .fetch_posts(
        request.page,
        request.size
      )
      .map(normalize_page)
  }
}

/// Client-only counters start at zero;
/// server counts are taken as sent.
pub fn normalize_page(
  page: PostPage
) -> FeedPage {
  FeedPage {
    entries:      page
      .content
      .into_iter()
      .map(FeedEntry::from_response)
      .collect(),
    current_page: page.current_page,
    has_next:     page.has_next
  }
}
