#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{
  AtomicI64,
  AtomicUsize,
  Ordering
};
use std::sync::mpsc::{
  self,
  Receiver,
  Sender
};
use std::sync::{
  Arc,
  Mutex
};
use std::time::Duration;

use blogfeed_core::app::context::AppContext;
use blogfeed_core::app::session::FeedSession;
use blogfeed_core::domain::error::ErrorKind;
use blogfeed_core::domain::list_store::ListStore;
use blogfeed_core::domain::model::{
  Comment,
  FeedEntry,
  Notification,
  PostId,
  PostPage,
  PostResponse,
  ReportRequest
};
use blogfeed_core::domain::scroll::LineViewport;
use blogfeed_core::infra::settings::FeedSettings;
use blogfeed_core::ports::blog_api::BlogApi;
use blogfeed_core::ports::clock::Clock;

type Outcome<T> = Result<T, ErrorKind>;

pub const WAIT: Duration =
  Duration::from_secs(5);

pub fn post(
  id: PostId,
  topic: &str
) -> PostResponse {
  PostResponse {
    id,
    title: format!("post {id}"),
    topic: topic.to_string(),
    banner: None,
    description: String::new(),
    created_at: None,
    first_name: "Ada".to_string(),
    last_name: "Lovelace".to_string(),
    profile_pic: None,
    like_count: 0,
    comment_count: 0,
    is_liked: false
  }
}

pub fn entry(
  id: PostId,
  topic: &str
) -> FeedEntry {
  FeedEntry::from_response(post(
    id, topic
  ))
}

pub fn entries(
  ids: &[PostId]
) -> Vec<FeedEntry> {
  ids
    .iter()
    .map(|id| entry(*id, "tech"))
    .collect()
}

/// Store ids in display order.
pub fn ids(
  store: &ListStore
) -> Vec<PostId> {
  store
    .entries()
    .iter()
    .map(|entry| entry.id)
    .collect()
}

pub fn page(
  ids: &[PostId],
  current_page: u32,
  has_next: bool
) -> PostPage {
  PostPage {
    content: ids
      .iter()
      .map(|id| post(*id, "tech"))
      .collect(),
    current_page,
    total_pages: current_page + 1,
    has_next
  }
}

pub struct ManualClock {
  now: AtomicI64
}

impl ManualClock {
  pub fn new() -> Self {
    Self {
      now: AtomicI64::new(1_000)
    }
  }

  pub fn advance(&self, ms: i64) {
    self
      .now
      .fetch_add(ms, Ordering::SeqCst);
  }
}

impl Clock for ManualClock {
  fn now_epoch_ms(&self) -> i64 {
    self.now.load(Ordering::SeqCst)
  }
}

/// In-memory backend with scripted
/// answers. When gated, every page
/// fetch waits for a permit.
#[derive(Default)]
pub struct ScriptedApi {
  pages:
    Mutex<VecDeque<Outcome<PostPage>>>,
  likes: Mutex<VecDeque<Outcome<()>>>,
  deletes:
    Mutex<VecDeque<Outcome<()>>>,
  gate: Mutex<Option<Receiver<()>>>,
  pub requested:
    Mutex<Vec<(u32, u32)>>,
  pub fetch_calls:   AtomicUsize,
  pub fetch_done:    AtomicUsize,
  pub like_calls:    AtomicUsize,
  pub delete_calls:  AtomicUsize,
  pub comment_calls: AtomicUsize,
  pub report_calls:  AtomicUsize
}

fn bump(counter: &AtomicUsize) {
  counter
    .fetch_add(1, Ordering::SeqCst);
}

impl ScriptedApi {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn gated() -> (Self, Sender<()>) {
    let (tx, rx) = mpsc::channel();
    let api = Self::default();
    *api.gate.lock().unwrap() =
      Some(rx);
    (api, tx)
  }

  pub fn push_page(
    &self,
    result: Outcome<PostPage>
  ) {
    self
      .pages
      .lock()
      .unwrap()
      .push_back(result);
  }

  /// Queues a page of `tech` posts.
  pub fn queue(
    &self,
    ids: &[PostId],
    current_page: u32,
    has_next: bool
  ) {
    self.push_page(Ok(page(
      ids,
      current_page,
      has_next
    )));
  }

  pub fn push_like(
    &self,
    result: Outcome<()>
  ) {
    self
      .likes
      .lock()
      .unwrap()
      .push_back(result);
  }

  pub fn push_delete(
    &self,
    result: Outcome<()>
  ) {
    self
      .deletes
      .lock()
      .unwrap()
      .push_back(result);
  }

  pub fn fetches(&self) -> usize {
    self
      .fetch_calls
      .load(Ordering::SeqCst)
  }
}

impl BlogApi for ScriptedApi {
  fn fetch_posts(
    &self,
    page: u32,
    size: u32
  ) -> Outcome<PostPage> {
    bump(&self.fetch_calls);
    self
      .requested
      .lock()
      .unwrap()
      .push((page, size));
    {
      let gate =
        self.gate.lock().unwrap();
      if let Some(rx) = gate.as_ref() {
        let _ = rx.recv();
      }
    }
    let result = self
      .pages
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| {
        Ok(page_empty(page))
      });
    bump(&self.fetch_done);
    result
  }

  fn toggle_like(
    &self,
    _id: PostId
  ) -> Outcome<()> {
    bump(&self.like_calls);
    self
      .likes
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or(Ok(()))
  }

  fn delete_post(
    &self,
    _id: PostId
  ) -> Outcome<()> {
    bump(&self.delete_calls);
    self
      .deletes
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or(Ok(()))
  }

  fn list_comments(
    &self,
    _id: PostId
  ) -> Outcome<Vec<Comment>> {
    Ok(vec![comment(1, "first")])
  }

  fn add_comment(
    &self,
    _id: PostId,
    content: &str
  ) -> Outcome<Comment> {
    bump(&self.comment_calls);
    Ok(comment(99, content))
  }

  fn submit_report(
    &self,
    _report: &ReportRequest
  ) -> Outcome<()> {
    bump(&self.report_calls);
    Ok(())
  }

  fn list_notifications(
    &self
  ) -> Outcome<Vec<Notification>> {
    Ok(vec![
      notification(1, false),
      notification(2, true),
    ])
  }

  fn mark_notification_read(
    &self,
    _id: i64
  ) -> Outcome<()> {
    Ok(())
  }
}

fn page_empty(page: u32) -> PostPage {
  PostPage {
    content: Vec::new(),
    current_page: page,
    total_pages: page,
    has_next: false
  }
}

pub fn comment(
  id: i64,
  content: &str
) -> Comment {
  Comment {
    id,
    content: content.to_string(),
    created_at: None,
    first_name: "Grace".to_string(),
    last_name: "Hopper".to_string(),
    profile_pic: None
  }
}

pub fn notification(
  id: i64,
  read: bool
) -> Notification {
  Notification {
    id,
    kind: "POST".to_string(),
    sender_id: Some(7),
    sender_name: "Grace".to_string(),
    sender_profile_pic: None,
    message: "liked your post"
      .to_string(),
    read,
    created_at: None
  }
}

pub fn settings(
  page_size: u32
) -> FeedSettings {
  FeedSettings {
    page_size,
    load_threshold: 3,
    sample_interval_ms: 200,
    ..FeedSettings::default()
  }
}

pub struct Harness {
  pub api:      Arc<ScriptedApi>,
  pub clock:    Arc<ManualClock>,
  pub session:  FeedSession,
  pub ctx:      AppContext,
  pub viewport: LineViewport
}

impl Harness {
  pub fn new(api: ScriptedApi) -> Self {
    let api = Arc::new(api);
    let clock =
      Arc::new(ManualClock::new());
    let session = FeedSession::new(
      api.clone(),
      clock.clone(),
      &settings(2)
    );
    Self {
      api,
      clock,
      session,
      ctx: AppContext::new(),
      viewport: LineViewport::new(10)
    }
  }

  /// Applies exactly one worker result.
  pub fn settle_one(&mut self) {
    assert!(
      self.session.wait_event(
        &mut self.ctx,
        &self.viewport,
        WAIT
      ),
      "no worker result arrived"
    );
  }

  pub fn tick(&mut self) -> bool {
    self.session.tick(&self.viewport)
  }

  /// Runs the render step the TUI runs
  /// after every pump.
  pub fn draw(&mut self, rows: u32) {
    self.viewport.layout(rows);
    self
      .session
      .after_layout(&mut self.viewport);
  }
}
