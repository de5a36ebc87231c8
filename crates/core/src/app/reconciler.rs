//! Applies confirmed mutations (and the
//! local-only save toggle) to entries
//! already in the store. Missing ids
//! are ignored: the entry may have
//! been deleted meanwhile.

use crate::domain::list_store::ListStore;
use crate::domain::model::{
  EntryPatch,
  FeedEntry,
  PostId
};

pub fn like_patch(
  entry: &FeedEntry
) -> EntryPatch {
  let like_count = if entry.is_liked {
    entry.like_count.saturating_sub(1)
  } else {
    entry.like_count.saturating_add(1)
  };
  EntryPatch {
    is_liked: Some(!entry.is_liked),
    like_count: Some(like_count),
    ..EntryPatch::default()
  }
}

/// After the backend confirmed a toggle.
pub fn apply_like(
  store: &mut ListStore,
  id: PostId
) -> bool {
  let Some(patch) =
    store.get(id).map(like_patch)
  else {
    return false;
  };
  store.update_entry(id, patch)
}

/// After the backend confirmed a delete.
pub fn apply_delete(
  store: &mut ListStore,
  id: PostId
) -> bool {
  store.remove_entry(id)
}

/// Bookmarks never leave the client.
/// Returns the new saved flag.
pub fn toggle_save(
  store: &mut ListStore,
  id: PostId
) -> Option<bool> {
  let entry = store.get(id)?;
  let saved = !entry.is_saved;
  let saves = if saved {
    entry.saves.saturating_add(1)
  } else {
    entry.saves.saturating_sub(1)
  };
  store.update_entry(id, EntryPatch {
    is_saved: Some(saved),
    saves: Some(saves),
    ..EntryPatch::default()
  });
  Some(saved)
}

pub fn apply_comment_added(
  store: &mut ListStore,
  id: PostId
) -> bool {
  let Some(count) = store
    .get(id)
    .map(|entry| entry.comment_count)
  else {
    return false;
  };
  store.update_entry(id, EntryPatch {
    comment_count: Some(
      count.saturating_add(1)
    ),
    ..EntryPatch::default()
  })
}
