use std::collections::VecDeque;

use crate::domain::model::Notification;

pub const NOTICE_CAPACITY: usize = 32;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NoticeLevel {
  Info,
  Error
}

/// A transient, user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub level: NoticeLevel,
  pub text:  String
}

/// Application state shared between the
/// feed session and the views. The
/// session writes notices and the
/// notification inbox; views read them
/// and pop notices once shown.
#[derive(Debug, Default)]
pub struct AppContext {
  notices:       VecDeque<Notice>,
  notifications: Vec<Notification>
}

impl AppContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn info(
    &mut self,
    text: impl Into<String>
  ) {
    self.push(NoticeLevel::Info, text);
  }

  pub fn error(
    &mut self,
    text: impl Into<String>
  ) {
    self.push(NoticeLevel::Error, text);
  }

  fn push(
    &mut self,
    level: NoticeLevel,
    text: impl Into<String>
  ) {
    if self.notices.len()
      >= NOTICE_CAPACITY
    {
      self.notices.pop_front();
    }
    self.notices.push_back(Notice {
      level,
      text: text.into()
    });
  }

  pub fn latest_notice(
    &self
  ) -> Option<&Notice> {
    self.notices.back()
  }

  pub fn pop_notice(
    &mut self
  ) -> Option<Notice> {
    self.notices.pop_front()
  }

  pub fn set_notifications(
    &mut self,
    notifications: Vec<Notification>
  ) {
    self.notifications = notifications;
  }

  pub fn mark_read(
    &mut self,
    id: i64
  ) -> bool {
    match self
      .notifications
      .iter_mut()
      .find(|row| row.id == id)
    {
      | Some(row) => {
        row.read = true;
        true
      }
      | None => false
    }
  }

  pub fn notifications(
    &self
  ) -> &[Notification] {
    &self.notifications
  }

  pub fn unread_count(&self) -> usize {
    self
      .notifications
      .iter()
      .filter(|row| !row.read)
      .count()
  }
}
