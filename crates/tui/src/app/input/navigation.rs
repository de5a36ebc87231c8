use blogfeed_core::domain::scroll::Viewport;
use crossterm::event::KeyEvent;

use super::super::App;
use super::super::util::move_index;
use crate::config::KeyBinding;
use crate::ui::feed::ENTRY_ROWS;

impl App {
  pub(crate) fn key_matches(
    &self,
    binding: &KeyBinding,
    key: KeyEvent
  ) -> bool {
    key.code == binding.code
      && key.modifiers
        == binding.modifiers
  }

  pub(super) fn move_selection(
    &mut self,
    delta: i32
  ) {
    let len =
      self.visible_entries().len();
    self.selected = move_index(
      self.selected,
      len,
      delta
    );
    self.reveal_selected();
  }

  pub(super) fn jump_top(&mut self) {
    self.selected = 0;
    self.viewport.scroll_to_top();
  }

  pub(super) fn jump_bottom(&mut self) {
    let len =
      self.visible_entries().len();
    self.selected =
      len.saturating_sub(1);
    self
      .viewport
      .set_offset_from_bottom(0);
  }

  /// Scrolls a full screen and selects
  /// the first entry now on top.
  pub(super) fn page(
    &mut self,
    down: bool
  ) {
    let rows = self
      .viewport
      .viewport_height()
      .max(1);
    if down {
      self.viewport.scroll_down(rows);
    } else {
      self.viewport.scroll_up(rows);
    }
    let len =
      self.visible_entries().len();
    let top_row =
      self.viewport.top_row();
    let top_entry =
      (top_row / ENTRY_ROWS) as usize;
    self.selected = top_entry
      .min(len.saturating_sub(1));
  }

  fn reveal_selected(&mut self) {
    let start =
      self.selected as u32 * ENTRY_ROWS;
    let end = start + ENTRY_ROWS;
    self.viewport.reveal(start, end);
  }
}
