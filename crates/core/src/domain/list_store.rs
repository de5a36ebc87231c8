//! Ordered, de-duplicated list of feed
//! entries plus the cursor and load
//! state that govern how it grows.

use std::collections::HashSet;

use super::error::{
  ErrorKind,
  StoreError
};
use super::load_state::{
  Begin,
  LoadKind,
  LoadState,
  Loader
};
use super::model::{
  Category,
  EntryPatch,
  FeedEntry,
  PostId
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct PageCursor {
  pub current_page: u32,
  pub has_more:     bool,
  pub page_size:    u32
}

impl PageCursor {
  pub fn new(page_size: u32) -> Self {
    Self {
      current_page: 0,
      has_more: true,
      page_size: page_size.max(1)
    }
  }
}

#[derive(Debug, Clone)]
pub struct ListStore {
  entries:  Vec<FeedEntry>,
  ids:      HashSet<PostId>,
  cursor:   PageCursor,
  loader:   Loader,
  category: Category
}

impl ListStore {
  pub fn new(
    page_size: u32,
    category: Category
  ) -> Self {
    Self {
      entries: Vec::new(),
      ids: HashSet::new(),
      cursor: PageCursor::new(
        page_size
      ),
      loader: Loader::default(),
      category
    }
  }

  pub fn reset(
    &mut self,
    category: Category
  ) {
    self.entries.clear();
    self.ids.clear();
    self.cursor =
      PageCursor::new(
        self.cursor.page_size
      );
    self.loader.reset();
    self.category = category;
  }

  pub fn begin_initial(&mut self) {
    self.loader.begin_initial();
  }

  pub fn begin_more(
    &mut self
  ) -> Begin {
    self
      .loader
      .begin_more(self.cursor.has_more)
  }

  pub fn retry(
    &mut self
  ) -> Option<LoadKind> {
    self
      .loader
      .retry(self.cursor.has_more)
  }

  /// Appends the unseen part of a
  /// page, keeping received order, and
  /// returns how many entries were
  /// added.
  pub fn append_page(
    &mut self,
    entries: Vec<FeedEntry>,
    has_next: bool,
    next_page: u32
  ) -> Result<usize, StoreError> {
    if !self.loader.state().is_loading()
    {
      return Err(StoreError::NotLoading(
        self.loader.state().clone()
      ));
    }

    let before = self.entries.len();
    for entry in entries {
      if self.ids.insert(entry.id) {
        self.entries.push(entry);
      }
    }

    self.cursor.current_page = self
      .cursor
      .current_page
      .max(next_page);
    self.cursor.has_more =
      self.cursor.has_more && has_next;
    self.loader.complete();

    Ok(self.entries.len() - before)
  }

  /// Returns `false` when nothing was
  /// in flight to fail.
  pub fn fail_load(
    &mut self,
    error: ErrorKind
  ) -> bool {
    self.loader.fail(error)
  }

  pub fn update_entry(
    &mut self,
    id: PostId,
    patch: EntryPatch
  ) -> bool {
    match self
      .entries
      .iter_mut()
      .find(|entry| entry.id == id)
    {
      | Some(entry) => {
        patch.apply(entry);
        true
      }
      | None => false
    }
  }

  pub fn remove_entry(
    &mut self,
    id: PostId
  ) -> bool {
    if !self.ids.remove(&id) {
      return false;
    }
    self
      .entries
      .retain(|entry| entry.id != id);
    true
  }

  pub fn get(
    &self,
    id: PostId
  ) -> Option<&FeedEntry> {
    self
      .entries
      .iter()
      .find(|entry| entry.id == id)
  }

  pub fn contains(
    &self,
    id: PostId
  ) -> bool {
    self.ids.contains(&id)
  }

  pub fn entries(
    &self
  ) -> &[FeedEntry] {
    &self.entries
  }

  /// Entries matching the active
  /// category, in store order.
  pub fn visible(
    &self
  ) -> Vec<&FeedEntry> {
    let category = self.category;
    self
      .entries
      .iter()
      .filter(|entry| {
        category.matches(&entry.topic)
      })
      .collect()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn cursor(&self) -> PageCursor {
    self.cursor
  }

  pub fn load_state(
    &self
  ) -> &LoadState {
    self.loader.state()
  }

  pub fn category(&self) -> Category {
    self.category
  }
}
