use blogfeed_core::domain::error::ErrorKind;
use blogfeed_core::domain::model::{
  PostId,
  REPORT_REASONS,
  ReportRequest
};
use crossterm::event::{
  KeyCode,
  KeyEvent
};

use super::input::text::edit_text;
use super::util::move_index;
use super::{
  App,
  ModalState,
  ReportField
};

impl App {
  pub(super) fn handle_modal_key(
    &mut self,
    key: KeyEvent
  ) {
    if key.code == KeyCode::Esc {
      self.modal = None;
      return;
    }

    let Some(modal) = self.modal.take()
    else {
      return;
    };

    self.modal = match modal {
      | ModalState::ConfirmDelete {
        post_id,
        title
      } => match key.code {
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => {
          self.session.delete(post_id);
          None
        }
        | KeyCode::Char('n')
        | KeyCode::Char('N') => None,
        | _ => Some(
          ModalState::ConfirmDelete {
            post_id,
            title
          }
        )
      },
      | ModalState::Comments {
        post_id,
        title,
        mut draft
      } => {
        if key.code == KeyCode::Enter {
          let sent = self
            .session
            .add_comment(
              post_id, &draft
            );
          match sent {
            | Ok(()) => draft.clear(),
            | Err(error) => {
              self.ctx.error(
                comment_error(&error)
              );
            }
          }
        } else {
          edit_text(&mut draft, key);
        }
        Some(ModalState::Comments {
          post_id,
          title,
          draft
        })
      }
      | ModalState::Report {
        post_id,
        reason,
        description,
        field
      } => self.report_key(
        key,
        post_id,
        reason,
        description,
        field
      ),
      | ModalState::Notifications {
        selected
      } => {
        let len = self
          .ctx
          .notifications()
          .len();
        let selected = match key.code {
          | KeyCode::Down => {
            move_index(selected, len, 1)
          }
          | KeyCode::Up => move_index(
            selected, len, -1
          ),
          | _ if self.key_matches(
            &self.keys.move_down,
            key
          ) =>
          {
            move_index(selected, len, 1)
          }
          | _ if self.key_matches(
            &self.keys.move_up,
            key
          ) =>
          {
            move_index(
              selected, len, -1
            )
          }
          | KeyCode::Enter => {
            if let Some(row) = self
              .ctx
              .notifications()
              .get(selected)
              .filter(|row| !row.read)
            {
              let id = row.id;
              self
                .session
                .mark_notification_read(
                  id
                );
            }
            selected
          }
          | _ => selected
        };
        Some(ModalState::Notifications {
          selected
        })
      }
    };
  }

  fn report_key(
    &mut self,
    key: KeyEvent,
    post_id: PostId,
    mut reason: usize,
    mut description: String,
    mut field: ReportField
  ) -> Option<ModalState> {
    match (key.code, field) {
      | (KeyCode::Tab, _) => {
        let on_reason =
          field == ReportField::Reason;
        field = if on_reason {
          ReportField::Description
        } else {
          ReportField::Reason
        };
      }
      | (KeyCode::Enter, _) => {
        let request =
          ReportRequest::for_post(
            post_id,
            REPORT_REASONS[reason],
            description.trim()
          );
        let sent =
          self.session.report(request);
        match sent {
          | Ok(()) => return None,
          | Err(error) => {
            self
              .ctx
              .error(error.to_string())
          }
        }
      }
      | (
        KeyCode::Down,
        ReportField::Reason
      ) => {
        reason = move_index(
          reason,
          REPORT_REASONS.len(),
          1
        );
      }
      | (
        KeyCode::Up,
        ReportField::Reason
      ) => {
        reason = move_index(
          reason,
          REPORT_REASONS.len(),
          -1
        );
      }
      | (_, ReportField::Reason) => {}
      | (
        _,
        ReportField::Description
      ) => {
        edit_text(
          &mut description,
          key
        );
      }
    }

    Some(ModalState::Report {
      post_id,
      reason,
      description,
      field
    })
  }

  pub(super) fn open_delete_confirm(
    &mut self,
    post_id: PostId,
    title: String
  ) {
    self.modal =
      Some(ModalState::ConfirmDelete {
        post_id,
        title
      });
  }

  pub(super) fn open_comments(
    &mut self,
    post_id: PostId,
    title: String
  ) {
    self.session.load_comments(post_id);
    self.modal =
      Some(ModalState::Comments {
        post_id,
        title,
        draft: String::new()
      });
  }

  pub(super) fn open_report(
    &mut self,
    post_id: PostId
  ) {
    self.modal =
      Some(ModalState::Report {
        post_id,
        reason: 0,
        description: String::new(),
        field: ReportField::Reason
      });
  }

  pub(super) fn open_notifications(
    &mut self
  ) {
    self
      .session
      .refresh_notifications();
    self.modal =
      Some(ModalState::Notifications {
        selected: 0
      });
  }
}

fn comment_error(
  error: &ErrorKind
) -> String {
  match error {
    | ErrorKind::Invalid(message) => {
      format!(
        "Comment not sent: {message}"
      )
    }
    | ErrorKind::NotFound => {
      "That post is gone".to_string()
    }
    | other => other.to_string()
  }
}
