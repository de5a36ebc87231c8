mod main;
mod navigation;
pub(super) mod text;

use anyhow::Result;
use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyModifiers
};

use super::App;

impl App {
  /// Returns `true` when the user asked
  /// to quit.
  pub(crate) fn handle_key(
    &mut self,
    key: KeyEvent
  ) -> Result<bool> {
    if key.code == KeyCode::Char('c')
      && key.modifiers
        == KeyModifiers::CONTROL
    {
      return Ok(true);
    }

    if self.modal.is_some() {
      self.handle_modal_key(key);
      return Ok(false);
    }

    self.handle_main_key(key)
  }
}
