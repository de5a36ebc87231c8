//! Viewport sampling, the load-more
//! threshold and scroll compensation
//! for appended content.
//!
//! Offsets are measured from the
//! bottom edge of the content: the
//! number of rows (or pixels) hidden
//! below the viewport. Growing the
//! content by `delta` and adding
//! `delta` to that offset keeps what is
//! on screen still.

pub const DEFAULT_LOAD_THRESHOLD: u32 =
  100;
pub const DEFAULT_SAMPLE_INTERVAL_MS:
  u64 = 200;

pub trait Viewport {
  fn content_height(&self) -> u32;
  fn viewport_height(&self) -> u32;
  fn offset_from_bottom(&self) -> u32;
  fn set_offset_from_bottom(
    &mut self,
    offset: u32
  );

  fn max_offset(&self) -> u32 {
    self
      .content_height()
      .saturating_sub(
        self.viewport_height()
      )
  }
}

/// Snapshot of a viewport taken when a
/// sample is due.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ScrollMetrics {
  pub content_height:  u32,
  pub viewport_height: u32,
  pub distance_to_bottom: u32
}

impl ScrollMetrics {
  pub fn of(
    viewport: &impl Viewport
  ) -> Self {
    Self {
      content_height:  viewport
        .content_height(),
      viewport_height: viewport
        .viewport_height(),
      distance_to_bottom: viewport
        .offset_from_bottom()
        .min(viewport.max_offset())
    }
  }

  /// True when the bottom of the
  /// content is closer than
  /// `threshold`, or the content does
  /// not fill the viewport.
  pub fn within_threshold(
    &self,
    threshold: u32
  ) -> bool {
    self.content_height
      <= self.viewport_height
      || self.distance_to_bottom
        < threshold
  }
}

/// Rate limiter for viewport sampling.
#[derive(Debug, Clone)]
pub struct ScrollSampler {
  interval_ms:    i64,
  last_sample_ms: Option<i64>
}

impl ScrollSampler {
  pub fn new(interval_ms: u64) -> Self {
    Self {
      interval_ms:    i64::try_from(
        interval_ms
      )
      .unwrap_or(i64::MAX),
      last_sample_ms: None
    }
  }

  pub fn should_sample(
    &mut self,
    now_ms: i64
  ) -> bool {
    if let Some(last) =
      self.last_sample_ms
    {
      let elapsed = now_ms - last;
      if elapsed < self.interval_ms {
        return false;
      }
    }
    self.last_sample_ms = Some(now_ms);
    true
  }

  pub fn reset(&mut self) {
    self.last_sample_ms = None;
  }
}

/// Content height recorded right before
/// an append. `settle` consumes the
/// anchor, so a given append is
/// compensated exactly once.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ScrollAnchor {
  height_before: u32
}

impl ScrollAnchor {
  pub fn capture(
    viewport: &impl Viewport
  ) -> Self {
    Self {
      height_before: viewport
        .content_height()
    }
  }

  pub fn height_before(&self) -> u32 {
    self.height_before
  }

  /// Call after layout. Returns the
  /// growth that was compensated.
  pub fn settle(
    self,
    viewport: &mut impl Viewport
  ) -> u32 {
    let delta = viewport
      .content_height()
      .saturating_sub(
        self.height_before
      );
    if delta > 0 {
      let offset = viewport
        .offset_from_bottom()
        .saturating_add(delta)
        .min(viewport.max_offset());
      viewport
        .set_offset_from_bottom(offset);
    }
    delta
  }
}

/// Row-based viewport for list
/// renderers that lay content out top
/// to bottom.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct LineViewport {
  content_height:  u32,
  viewport_height: u32,
  offset:          u32
}

impl LineViewport {
  pub fn new(
    viewport_height: u32
  ) -> Self {
    Self {
      content_height: 0,
      viewport_height,
      offset: 0
    }
  }

  pub fn set_viewport_height(
    &mut self,
    height: u32
  ) {
    self.viewport_height = height;
    self.clamp();
  }

  /// Records the height the last render
  /// produced. The bottom-relative
  /// offset is kept (then clamped).
  pub fn layout(
    &mut self,
    content_height: u32
  ) {
    self.content_height =
      content_height;
    self.clamp();
  }

  pub fn scroll_down(
    &mut self,
    rows: u32
  ) {
    self.offset =
      self.offset.saturating_sub(rows);
  }

  pub fn scroll_up(
    &mut self,
    rows: u32
  ) {
    self.offset = self
      .offset
      .saturating_add(rows)
      .min(self.max_offset());
  }

  pub fn scroll_to_top(&mut self) {
    self.offset = self.max_offset();
  }

  /// First content row on screen.
  pub fn top_row(&self) -> u32 {
    self.content_height.saturating_sub(
      self.viewport_height + self.offset
    )
  }

  /// Scrolls the minimum needed to
  /// bring rows `start..end` on screen.
  pub fn reveal(
    &mut self,
    start: u32,
    end: u32
  ) {
    let top = self.top_row();
    let bottom =
      top + self.viewport_height;
    if start < top {
      self.scroll_up(top - start);
    } else if end > bottom {
      let overshoot = (end - bottom)
        .min(start.saturating_sub(top));
      self.scroll_down(overshoot);
    }
  }

  fn clamp(&mut self) {
    let max = self.max_offset();
    self.offset = self.offset.min(max);
  }
}

impl Viewport for LineViewport {
  fn content_height(&self) -> u32 {
    self.content_height
  }

  fn viewport_height(&self) -> u32 {
    self.viewport_height
  }

  fn offset_from_bottom(&self) -> u32 {
    self.offset
  }

  fn set_offset_from_bottom(
    &mut self,
    offset: u32
  ) {
    self.offset = offset;
    self.clamp();
  }
}
