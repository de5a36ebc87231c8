//! One explore-feed session: owns the
//! list store, runs backend calls on
//! worker threads and applies their
//! results on the caller's thread.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{
  self,
  Receiver,
  RecvTimeoutError,
  Sender
};
use std::thread;
use std::time::Duration;

use tracing::{
  debug,
  info,
  warn
};

use super::context::AppContext;
use super::fetcher::{
  FeedFetcher,
  PageRequest
};
use super::reconciler::{
  self,
  apply_comment_added
};
use crate::domain::error::ErrorKind;
use crate::domain::list_store::ListStore;
use crate::domain::load_state::{
  Begin,
  LoadKind,
  LoadState
};
use crate::domain::model::{
  Category,
  Comment,
  FeedPage,
  Notification,
  PostId,
  ReportRequest
};
use crate::domain::scroll::{
  ScrollAnchor,
  ScrollMetrics,
  ScrollSampler,
  Viewport
};
use crate::infra::settings::FeedSettings;
use crate::ports::blog_api::BlogApi;
use crate::ports::clock::Clock;

type Outcome<T> = Result<T, ErrorKind>;

/// Worker results. Everything tied to
/// the list carries the generation it
/// was issued under.
#[derive(Debug)]
pub enum FeedEvent {
  Page {
    generation: u64,
    kind:       LoadKind,
    result:     Outcome<FeedPage>
  },
  Like {
    generation: u64,
    id:         PostId,
    result:     Outcome<()>
  },
  Delete {
    generation: u64,
    id:         PostId,
    result:     Outcome<()>
  },
  Comments {
    id:     PostId,
    result: Outcome<Vec<Comment>>
  },
  CommentAdded {
    generation: u64,
    id:         PostId,
    result:     Outcome<Comment>
  },
  Report {
    result: Outcome<()>
  },
  Notifications {
    result: Outcome<Vec<Notification>>
  },
  NotificationRead {
    id:     i64,
    result: Outcome<()>
  }
}

/// Layout work owed to the viewport
/// after the next render.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
enum PendingLayout {
  ScrollToTop,
  Compensate(ScrollAnchor)
}

pub struct FeedSession {
  api:            Arc<dyn BlogApi>,
  fetcher:        FeedFetcher,
  clock:          Arc<dyn Clock>,
  store:          ListStore,
  sampler:        ScrollSampler,
  load_threshold: u32,
  generation:     u64,
  pending_layout: Option<PendingLayout>,
  last_metrics:   Option<ScrollMetrics>,
  comments:
    HashMap<PostId, Vec<Comment>>,
  pending:        usize,
  tx:             Sender<FeedEvent>,
  rx:             Receiver<FeedEvent>
}

impl FeedSession {
  pub fn new(
    api: Arc<dyn BlogApi>,
    clock: Arc<dyn Clock>,
    settings: &FeedSettings
  ) -> Self {
    let (tx, rx) = mpsc::channel();
    Self {
      fetcher: FeedFetcher::new(
        Arc::clone(&api)
      ),
      api,
      clock,
      store: ListStore::new(
        settings.page_size,
        settings.category
      ),
      sampler: ScrollSampler::new(
        settings.sample_interval_ms
      ),
      load_threshold: settings
        .load_threshold,
      generation: 0,
      pending_layout: None,
      last_metrics: None,
      comments: HashMap::new(),
      pending: 0,
      tx,
      rx
    }
  }

  pub fn mount(&mut self) {
    let category =
      self.store.category();
    self.start_fresh(category);
  }

  pub fn reload(&mut self) {
    self.mount();
  }

  /// Returns `false` when `category` is
  /// already active.
  pub fn select_category(
    &mut self,
    category: Category
  ) -> bool {
    if category == self.store.category()
    {
      return false;
    }
    self.start_fresh(category);
    true
  }

  fn start_fresh(
    &mut self,
    category: Category
  ) {
    self.generation += 1;
    self.store.reset(category);
    self.sampler.reset();
    self.pending_layout = None;
    self.last_metrics = None;
    self.comments.clear();
    info!(
      generation = self.generation,
      category = category.label(),
      "feed session reset"
    );
    self.store.begin_initial();
    self
      .dispatch_page(LoadKind::Initial);
  }

  /// Backpressure: at most one page
  /// request in flight, none once the
  /// feed is exhausted.
  pub fn request_more(
    &mut self
  ) -> bool {
    match self.store.begin_more() {
      | Begin::Started(kind) => {
        self.dispatch_page(kind);
        true
      }
      | Begin::Busy => {
        debug!(
          "load-more ignored: busy"
        );
        false
      }
      | Begin::Exhausted => false
    }
  }

  pub fn retry(&mut self) -> bool {
    match self.store.retry() {
      | Some(kind) => {
        self.dispatch_page(kind);
        true
      }
      | None => false
    }
  }

  /// Samples the viewport when the
  /// sampling interval allows and asks
  /// for more when the bottom is near.
  /// After a failure only a changed
  /// viewport (a real scroll) retries.
  pub fn tick(
    &mut self,
    viewport: &impl Viewport
  ) -> bool {
    // The viewport still describes the
    // previous content until the next
    // `after_layout`.
    if self.pending_layout.is_some() {
      return false;
    }

    let now = self.clock.now_epoch_ms();
    if !self.sampler.should_sample(now)
    {
      return false;
    }

    let metrics =
      ScrollMetrics::of(viewport);
    let previous = self
      .last_metrics
      .replace(metrics);

    if !metrics.within_threshold(
      self.load_threshold
    ) {
      return false;
    }

    if matches!(
      self.store.load_state(),
      LoadState::Error { .. }
    ) && previous == Some(metrics)
    {
      return false;
    }

    self.request_more()
  }

  fn dispatch_page(
    &mut self,
    kind: LoadKind
  ) {
    let request = PageRequest::for_load(
      self.store.cursor(),
      kind
    );
    let generation = self.generation;
    let fetcher = self.fetcher.clone();
    debug!(
      page = request.page,
      size = request.size,
      generation,
      "page request"
    );
    self.spawn(move || FeedEvent::Page {
      generation,
      kind,
      result: fetcher
        .fetch_page(request)
    });
  }

  fn spawn<F>(&mut self, call: F)
  where
    F: FnOnce() -> FeedEvent
      + Send
      + 'static
  {
    let sender = self.tx.clone();
    self.pending += 1;
    thread::spawn(move || {
      // The receiver is gone once the
      // session is dropped; the result
      // is discarded.
      let _ = sender.send(call());
    });
  }

  /// Update-after-confirm: the entry
  /// changes only when the backend
  /// agrees.
  pub fn like(
    &mut self,
    id: PostId
  ) -> bool {
    if !self.store.contains(id) {
      return false;
    }
    let api = Arc::clone(&self.api);
    let generation = self.generation;
    self.spawn(move || FeedEvent::Like {
      generation,
      id,
      result: api.toggle_like(id)
    });
    true
  }

  pub fn delete(
    &mut self,
    id: PostId
  ) -> bool {
    if !self.store.contains(id) {
      return false;
    }
    let api = Arc::clone(&self.api);
    let generation = self.generation;
    self.spawn(move || {
      FeedEvent::Delete {
        generation,
        id,
        result: api.delete_post(id)
      }
    });
    true
  }

  /// Local bookmark toggle; no request.
  pub fn save(
    &mut self,
    id: PostId,
    ctx: &mut AppContext
  ) -> bool {
    match reconciler::toggle_save(
      &mut self.store,
      id
    ) {
      | Some(true) => {
        ctx.info("Post saved!");
        true
      }
      | Some(false) => {
        ctx.info(
          "Removed from saved posts"
        );
        true
      }
      | None => false
    }
  }

  pub fn load_comments(
    &mut self,
    id: PostId
  ) -> bool {
    if !self.store.contains(id) {
      return false;
    }
    let api = Arc::clone(&self.api);
    self.spawn(move || {
      FeedEvent::Comments {
        id,
        result: api.list_comments(id)
      }
    });
    true
  }

  pub fn add_comment(
    &mut self,
    id: PostId,
    text: &str
  ) -> Outcome<()> {
    let content =
      text.trim().to_string();
    if content.is_empty() {
      return Err(ErrorKind::Invalid(
        "comment is empty".to_string()
      ));
    }
    if !self.store.contains(id) {
      return Err(ErrorKind::NotFound);
    }
    let api = Arc::clone(&self.api);
    let generation = self.generation;
    self.spawn(move || {
      FeedEvent::CommentAdded {
        generation,
        id,
        result: api
          .add_comment(id, &content)
      }
    });
    Ok(())
  }

  pub fn report(
    &mut self,
    request: ReportRequest
  ) -> Outcome<()> {
    request
      .validate()
      .map_err(ErrorKind::Invalid)?;
    let api = Arc::clone(&self.api);
    self.spawn(move || {
      FeedEvent::Report {
        result: api
          .submit_report(&request)
      }
    });
    Ok(())
  }

  pub fn refresh_notifications(
    &mut self
  ) {
    let api = Arc::clone(&self.api);
    self.spawn(move || {
      FeedEvent::Notifications {
        result: api.list_notifications()
      }
    });
  }

  pub fn mark_notification_read(
    &mut self,
    id: i64
  ) {
    let api = Arc::clone(&self.api);
    self.spawn(move || {
      FeedEvent::NotificationRead {
        id,
        result: api
          .mark_notification_read(id)
      }
    });
  }

  /// Applies every result that is
  /// ready.
  pub fn pump(
    &mut self,
    ctx: &mut AppContext,
    viewport: &impl Viewport
  ) -> usize {
    let mut applied = 0;
    while let Ok(event) =
      self.rx.try_recv()
    {
      self.apply_event(
        event, ctx, viewport
      );
      applied += 1;
    }
    applied
  }

  /// Blocks up to `timeout` for one
  /// result.
  pub fn wait_event(
    &mut self,
    ctx: &mut AppContext,
    viewport: &impl Viewport,
    timeout: Duration
  ) -> bool {
    match self.rx.recv_timeout(timeout)
    {
      | Ok(event) => {
        self.apply_event(
          event, ctx, viewport
        );
        true
      }
      | Err(RecvTimeoutError::Timeout)
      | Err(
        RecvTimeoutError::Disconnected
      ) => false
    }
  }

  /// Call once the new content has been
  /// laid out. Returns the compensated
  /// growth.
  pub fn after_layout(
    &mut self,
    viewport: &mut impl Viewport
  ) -> u32 {
    match self.pending_layout.take() {
      | Some(PendingLayout::Compensate(
        anchor
      )) => {
        let before =
          anchor.height_before();
        let delta =
          anchor.settle(viewport);
        debug!(
          before,
          delta,
          "append compensated"
        );
        delta
      }
      | Some(
        PendingLayout::ScrollToTop
      ) => {
        let top = viewport.max_offset();
        viewport
          .set_offset_from_bottom(top);
        0
      }
      | None => 0
    }
  }

  pub fn apply_event(
    &mut self,
    event: FeedEvent,
    ctx: &mut AppContext,
    viewport: &impl Viewport
  ) {
    self.pending =
      self.pending.saturating_sub(1);

    match event {
      | FeedEvent::Page {
        generation,
        kind,
        result
      } => {
        if generation != self.generation
        {
          debug!(
            generation,
            current = self.generation,
            "discarding stale page"
          );
          return;
        }
        self.apply_page(
          kind, result, ctx, viewport
        );
      }
      | FeedEvent::Like {
        generation,
        id,
        result
      } => match result {
        | Ok(()) => {
          let current = generation
            == self.generation;
          if current
            && !reconciler::apply_like(
              &mut self.store,
              id
            )
          {
            debug!(
              id,
              "liked post not listed"
            );
          }
        }
        | Err(error) => {
          warn!(
            id,
            error = %error,
            "like failed"
          );
          ctx.error(describe(
            "Like failed",
            &error
          ));
        }
      },
      | FeedEvent::Delete {
        generation,
        id,
        result
      } => match result {
        | Ok(()) => {
          if generation
            == self.generation
          {
            reconciler::apply_delete(
              &mut self.store,
              id
            );
          }
          self.comments.remove(&id);
          ctx.info("Post deleted");
        }
        | Err(ErrorKind::NotOwner) => {
          ctx.error(
            "Only the author can \
             delete this post"
          );
        }
        | Err(error) => {
          warn!(
            id,
            error = %error,
            "delete failed"
          );
          ctx.error(describe(
            "Delete failed",
            &error
          ));
        }
      },
      | FeedEvent::Comments {
        id,
        result
      } => match result {
        | Ok(comments) => {
          self
            .comments
            .insert(id, comments);
        }
        | Err(error) => {
          ctx.error(describe(
            "Could not load comments",
            &error
          ));
        }
      },
      | FeedEvent::CommentAdded {
        generation,
        id,
        result
      } => match result {
        | Ok(comment) => {
          if generation
            == self.generation
          {
            apply_comment_added(
              &mut self.store,
              id
            );
          }
          if let Some(thread) =
            self.comments.get_mut(&id)
          {
            thread.push(comment);
          }
          ctx.info("Comment posted");
        }
        | Err(error) => {
          ctx.error(describe(
            "Comment failed",
            &error
          ));
        }
      },
      | FeedEvent::Report {
        result
      } => match result {
        | Ok(()) => {
          ctx.info("Post reported")
        }
        | Err(error) => {
          ctx.error(describe(
            "Report failed",
            &error
          ))
        }
      },
      | FeedEvent::Notifications {
        result
      } => match result {
        | Ok(rows) => {
          ctx.set_notifications(rows)
        }
        | Err(error) => {
          ctx.error(describe(
            "Could not load \
             notifications",
            &error
          ));
        }
      },
      | FeedEvent::NotificationRead {
        id,
        result
      } => match result {
        | Ok(()) => {
          ctx.mark_read(id);
        }
        | Err(error) => {
          ctx.error(describe(
            "Could not update \
             notification",
            &error
          ));
        }
      }
    }
  }

  fn apply_page(
    &mut self,
    kind: LoadKind,
    result: Outcome<FeedPage>,
    ctx: &mut AppContext,
    viewport: &impl Viewport
  ) {
    match result {
      | Ok(page) => {
        let anchor =
          ScrollAnchor::capture(
            viewport
          );
        let next_page =
          page.next_page();
        match self.store.append_page(
          page.entries,
          page.has_next,
          next_page
        ) {
          | Ok(added) => {
            debug!(
              added,
              next_page,
              has_more = self
                .store
                .cursor()
                .has_more,
              "page applied"
            );
            self.pending_layout = self
              .layout_owed(
                kind, added, anchor
              );
          }
          | Err(error) => {
            warn!(
              error = %error,
              "page dropped"
            );
          }
        }
      }
      | Err(error) => {
        warn!(
          error = %error,
          "page load failed"
        );
        let message = describe(
          "Could not load posts",
          &error
        );
        if self.store.fail_load(error) {
          // A retry needs the viewport
          // to move first.
          self.last_metrics = Some(
            ScrollMetrics::of(viewport)
          );
          ctx.error(message);
        }
      }
    }
  }

  fn layout_owed(
    &self,
    kind: LoadKind,
    added: usize,
    anchor: ScrollAnchor
  ) -> Option<PendingLayout> {
    match kind {
      | LoadKind::Initial => {
        Some(PendingLayout::ScrollToTop)
      }
      | LoadKind::More if added > 0 => {
        Some(PendingLayout::Compensate(
          anchor
        ))
      }
      | LoadKind::More => {
        self.pending_layout
      }
    }
  }

  pub fn store(&self) -> &ListStore {
    &self.store
  }

  pub fn load_state(
    &self
  ) -> &LoadState {
    self.store.load_state()
  }

  pub fn category(&self) -> Category {
    self.store.category()
  }

  pub fn comments(
    &self,
    id: PostId
  ) -> Option<&[Comment]> {
    self
      .comments
      .get(&id)
      .map(Vec::as_slice)
  }

  pub fn pending_requests(
    &self
  ) -> usize {
    self.pending
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }
}

fn describe(
  what: &str,
  error: &ErrorKind
) -> String {
  match error {
    | ErrorKind::Unauthorized => {
      format!(
        "{what}: session expired, \
         sign in again"
      )
    }
    | error if error.is_transient() => {
      format!(
        "{what}: {error}. Try again."
      )
    }
    | error => {
      format!("{what}: {error}")
    }
  }
}
