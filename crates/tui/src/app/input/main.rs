use anyhow::Result;
use blogfeed_core::domain::model::Category;
use crossterm::event::KeyEvent;

use super::super::App;

impl App {
  pub(super) fn handle_main_key(
    &mut self,
    key: KeyEvent
  ) -> Result<bool> {
    if self
      .key_matches(&self.keys.quit, key)
    {
      return Ok(true);
    }

    if self.key_matches(
      &self.keys.move_down,
      key
    ) {
      self.move_selection(1);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.move_up,
      key
    ) {
      self.move_selection(-1);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.page_down,
      key
    ) {
      self.page(true);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.page_up,
      key
    ) {
      self.page(false);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.go_top,
      key
    ) {
      self.jump_top();
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.go_bottom,
      key
    ) {
      self.jump_bottom();
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.next_category,
      key
    ) {
      let next =
        self.session.category().next();
      self.switch_category(next);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.prev_category,
      key
    ) {
      let prev =
        self.session.category().prev();
      self.switch_category(prev);
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.reload,
      key
    ) {
      self.selected = 0;
      self.session.reload();
      self
        .session
        .refresh_notifications();
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.retry,
      key
    ) {
      if !self.session.retry() {
        self
          .ctx
          .info("Nothing to retry");
      }
      return Ok(false);
    }

    if self.key_matches(
      &self.keys.notifications,
      key
    ) {
      self.open_notifications();
      return Ok(false);
    }

    let Some(entry) =
      self.selected_entry()
    else {
      return Ok(false);
    };
    let post_id = entry.id;
    let title = entry.title.clone();

    if self.key_matches(
      &self.keys.like,
      key
    ) {
      self.session.like(post_id);
    } else if self.key_matches(
      &self.keys.save,
      key
    ) {
      self
        .session
        .save(post_id, &mut self.ctx);
    } else if self.key_matches(
      &self.keys.delete,
      key
    ) {
      self.open_delete_confirm(
        post_id, title
      );
    } else if self.key_matches(
      &self.keys.comments,
      key
    ) {
      self
        .open_comments(post_id, title);
    } else if self.key_matches(
      &self.keys.report,
      key
    ) {
      self.open_report(post_id);
    }

    Ok(false)
  }

  fn switch_category(
    &mut self,
    category: Category
  ) {
    if self
      .session
      .select_category(category)
    {
      self.selected = 0;
    }
  }
}
