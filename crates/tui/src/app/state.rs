use std::sync::Arc;
use std::time::{
  Duration,
  Instant
};

use blogfeed_core::app::context::{
  AppContext,
  Notice
};
use blogfeed_core::app::session::FeedSession;
use blogfeed_core::domain::model::{
  FeedEntry,
  PostId
};
use blogfeed_core::domain::scroll::LineViewport;
use blogfeed_core::ports::blog_api::BlogApi;
use blogfeed_core::ports::clock::Clock;

use crate::config::{
  ResolvedKeybindings,
  TuiConfig
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub(crate) enum ReportField {
  Reason,
  Description
}

#[derive(Debug, Clone)]
pub(crate) enum ModalState {
  ConfirmDelete {
    post_id: PostId,
    title:   String
  },
  Comments {
    post_id: PostId,
    title:   String,
    draft:   String
  },
  Report {
    post_id:     PostId,
    reason:      usize,
    description: String,
    field:       ReportField
  },
  Notifications {
    selected: usize
  }
}

pub(crate) struct App {
  pub(crate) session:    FeedSession,
  pub(crate) ctx:        AppContext,
  pub(crate) viewport:   LineViewport,
  pub(crate) keys:
    ResolvedKeybindings,
  pub(crate) selected:   usize,
  pub(crate) modal:
    Option<ModalState>,
  pub(crate) notice:
    Option<(Notice, Instant)>,
  pub(crate) notice_ttl: Duration
}

impl App {
  pub(crate) fn new(
    config: &TuiConfig,
    keys: ResolvedKeybindings,
    api: Arc<dyn BlogApi>,
    clock: Arc<dyn Clock>
  ) -> Self {
    Self {
      session: FeedSession::new(
        api,
        clock,
        &config.feed
      ),
      ctx: AppContext::new(),
      viewport: LineViewport::default(),
      keys,
      selected: 0,
      modal: None,
      notice: None,
      notice_ttl: Duration::from_millis(
        config.ui.notice_ttl_ms
      )
    }
  }

  pub(crate) fn start(&mut self) {
    self.session.mount();
    self
      .session
      .refresh_notifications();
  }

  /// Applies finished requests, rotates
  /// the notice line, then lets the
  /// session sample the viewport.
  pub(crate) fn on_tick(&mut self) {
    self.session.pump(
      &mut self.ctx,
      &self.viewport
    );

    while let Some(notice) =
      self.ctx.pop_notice()
    {
      self.notice =
        Some((notice, Instant::now()));
    }
    let expired = self
      .notice
      .as_ref()
      .is_some_and(|(_, shown)| {
        shown.elapsed()
          >= self.notice_ttl
      });
    if expired {
      self.notice = None;
    }

    self.clamp_selection();
    self.session.tick(&self.viewport);
  }

  pub(crate) fn visible_entries(
    &self
  ) -> Vec<&FeedEntry> {
    self.session.store().visible()
  }

  pub(crate) fn selected_entry(
    &self
  ) -> Option<&FeedEntry> {
    self
      .visible_entries()
      .get(self.selected)
      .copied()
  }

  pub(crate) fn clamp_selection(
    &mut self
  ) {
    let len =
      self.visible_entries().len();
    if self.selected >= len {
      self.selected =
        len.saturating_sub(1);
    }
  }
}
