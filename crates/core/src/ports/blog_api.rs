//! Backend the feed talks to. Calls
//! block; the session runs them off the
//! UI thread.

use crate::domain::error::ErrorKind;
use crate::domain::model::{
  Comment,
  Notification,
  PostId,
  PostPage,
  ReportRequest
};

pub trait BlogApi: Send + Sync {
  fn fetch_posts(
    &self,
    page: u32,
    size: u32
  ) -> Result<PostPage, ErrorKind>;

  /// Flips the caller's like; each call
  /// toggles.
  fn toggle_like(
    &self,
    id: PostId
  ) -> Result<(), ErrorKind>;

  fn delete_post(
    &self,
    id: PostId
  ) -> Result<(), ErrorKind>;

  fn list_comments(
    &self,
    id: PostId
  ) -> Result<Vec<Comment>, ErrorKind>;

  fn add_comment(
    &self,
    id: PostId,
    content: &str
  ) -> Result<Comment, ErrorKind>;

  fn submit_report(
    &self,
    report: &ReportRequest
  ) -> Result<(), ErrorKind>;

  fn list_notifications(
    &self
  ) -> Result<
    Vec<Notification>,
    ErrorKind
  >;

  fn mark_notification_read(
    &self,
    id: i64
  ) -> Result<(), ErrorKind>;
}
