mod support;

use std::collections::HashSet;

use blogfeed_core::domain::error::StoreError;
use blogfeed_core::domain::list_store::ListStore;
use blogfeed_core::domain::load_state::{
  Begin,
  LoadKind,
  LoadState
};
use blogfeed_core::domain::model::{
  Category,
  EntryPatch,
  PostId
};
use support::{
  entries,
  entry,
  ids
};

fn loading_store() -> ListStore {
  let mut store =
    ListStore::new(2, Category::All);
  store.begin_initial();
  store
}

fn add(
  store: &mut ListStore,
  page: &[PostId],
  has_next: bool,
  next_page: u32
) -> usize {
  store
    .append_page(
      entries(page),
      has_next,
      next_page
    )
    .unwrap()
}

#[test]
fn first_page_lands_in_empty_store() {
  let mut store = loading_store();
  let added =
    add(&mut store, &[1, 2], true, 1);

  assert_eq!(added, 2);
  assert_eq!(ids(&store), vec![1, 2]);
  let cursor = store.cursor();
  assert_eq!(cursor.current_page, 1);
  assert!(cursor.has_more);
  assert_eq!(
    store.load_state(),
    &LoadState::Idle
  );
}

#[test]
fn overlapping_page_is_deduplicated() {
  let mut store = loading_store();
  add(&mut store, &[1, 2], true, 1);

  assert_eq!(
    store.begin_more(),
    Begin::Started(LoadKind::More)
  );
  let added =
    add(&mut store, &[2, 3], false, 2);

  assert_eq!(added, 1);
  assert_eq!(
    ids(&store),
    vec![1, 2, 3]
  );
  let cursor = store.cursor();
  assert!(!cursor.has_more);
  assert_eq!(cursor.current_page, 2);
}

#[test]
fn ids_stay_unique_across_overlaps() {
  let mut store = loading_store();
  let mut expected = Vec::new();

  for start in 0..20i64 {
    if start > 0 {
      assert!(matches!(
        store.begin_more(),
        Begin::Started(_)
      ));
    }
    // Each window overlaps the previous
    // one by two ids.
    let first = start * 3;
    let window: Vec<PostId> =
      (first..first + 5).collect();
    for id in &window {
      if !expected.contains(id) {
        expected.push(*id);
      }
    }
    add(
      &mut store,
      &window,
      true,
      start as u32 + 1
    );
  }

  assert_eq!(ids(&store), expected);
  let unique: HashSet<PostId> =
    ids(&store).into_iter().collect();
  assert_eq!(unique.len(), store.len());
}

#[test]
fn append_while_idle_is_rejected() {
  let mut store =
    ListStore::new(2, Category::All);

  let err = store
    .append_page(entries(&[1]), true, 1)
    .unwrap_err();

  assert_eq!(
    err,
    StoreError::NotLoading(
      LoadState::Idle
    )
  );
  assert!(store.is_empty());
  assert_eq!(
    store.cursor().current_page,
    0
  );
}

#[test]
fn missing_ids_are_ignored() {
  let mut store = loading_store();
  add(&mut store, &[1, 2], true, 1);

  let patch = EntryPatch {
    like_count: Some(9),
    ..EntryPatch::default()
  };
  assert!(
    !store.update_entry(42, patch)
  );
  assert!(!store.remove_entry(42));
  assert_eq!(ids(&store), vec![1, 2]);
  assert_eq!(
    store.get(1).unwrap().like_count,
    0
  );
}

#[test]
fn update_merges_only_patched_fields() {
  let mut store = loading_store();
  add(&mut store, &[1], true, 1);

  store.update_entry(1, EntryPatch {
    is_liked: Some(true),
    ..EntryPatch::default()
  });

  let updated = store.get(1).unwrap();
  assert!(updated.is_liked);
  assert_eq!(updated.title, "post 1");
  assert_eq!(updated.like_count, 0);
}

#[test]
fn remove_keeps_order_once() {
  let mut store = loading_store();
  add(&mut store, &[1, 2, 3], true, 1);

  assert!(store.remove_entry(2));
  assert!(!store.remove_entry(2));
  assert_eq!(ids(&store), vec![1, 3]);
  assert!(!store.contains(2));
}

#[test]
fn removed_id_may_come_back() {
  let mut store = loading_store();
  add(&mut store, &[1, 2], true, 1);
  store.remove_entry(1);

  store.begin_more();
  add(&mut store, &[1, 3], true, 2);

  assert_eq!(
    ids(&store),
    vec![2, 1, 3]
  );
}

#[test]
fn cursor_never_moves_back() {
  let mut store = loading_store();
  add(&mut store, &[1], false, 3);

  assert_eq!(
    store.begin_more(),
    Begin::Exhausted
  );

  // A late page claiming more (and an
  // older index) changes neither.
  store.begin_initial();
  add(&mut store, &[2], true, 1);
  let cursor = store.cursor();
  assert_eq!(cursor.current_page, 3);
  assert!(!cursor.has_more);
}

#[test]
fn reset_starts_a_fresh_session() {
  let mut store = loading_store();
  add(&mut store, &[1, 2], false, 1);

  store.reset(Category::Gaming);

  assert!(store.is_empty());
  let cursor = store.cursor();
  assert_eq!(cursor.current_page, 0);
  assert!(cursor.has_more);
  assert_eq!(cursor.page_size, 2);
  assert_eq!(
    store.load_state(),
    &LoadState::Idle
  );
  assert_eq!(
    store.category(),
    Category::Gaming
  );
}

#[test]
fn category_filters_visible_only() {
  let mut store =
    ListStore::new(5, Category::Saas);
  store.begin_initial();
  store
    .append_page(
      vec![
        entry(1, "tech"),
        entry(2, "SaaS"),
        entry(3, "saas "),
      ],
      true,
      1
    )
    .unwrap();

  let visible: Vec<PostId> = store
    .visible()
    .iter()
    .map(|e| e.id)
    .collect();
  assert_eq!(visible, vec![2, 3]);
  assert_eq!(store.len(), 3);
}
