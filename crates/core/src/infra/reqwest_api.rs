//! Reqwest-backed `BlogApi`; maps
//! transport errors and statuses into
//! the feed's `ErrorKind`.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{
  Client,
  RequestBuilder,
  Response
};
use serde::de::DeserializeOwned;
use tracing::{
  debug,
  warn
};

use crate::domain::error::ErrorKind;
use crate::domain::model::{
  Comment,
  CommentRequest,
  Notification,
  PostId,
  PostPage,
  ReportRequest
};
use crate::ports::blog_api::BlogApi;

/// Which kind of call a status came
/// back from; `403` means different
/// things for reads and deletes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CallKind {
  Read,
  Write,
  Delete
}

pub struct ReqwestBlogApi {
  client:   Client,
  base_url: String,
  token:    Option<String>
}

impl ReqwestBlogApi {
  pub fn new(
    base_url: &str,
    token: Option<String>,
    timeout: Duration
  ) -> Result<Self, reqwest::Error> {
    let client = Client::builder()
      .timeout(timeout)
      .pool_idle_timeout(
        Duration::from_secs(120)
      )
      .build()?;

    Ok(Self {
      client,
      base_url: base_url
        .trim_end_matches('/')
        .to_string(),
      token
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url)
  }

  fn authorized(
    &self,
    req: RequestBuilder
  ) -> RequestBuilder {
    match &self.token {
      | Some(token) => {
        req.bearer_auth(token)
      }
      | None => req
    }
  }

  fn send(
    &self,
    req: RequestBuilder,
    kind: CallKind,
    what: &str
  ) -> Result<Response, ErrorKind> {
    debug!(what, "HTTP request start");
    let resp = self
      .authorized(req)
      .send()
      .map_err(|e| {
        warn!(
          what,
          error = %e,
          "HTTP request failed"
        );
        classify_transport(&e)
      })?;

    let status = resp.status().as_u16();
    if resp.status().is_success() {
      return Ok(resp);
    }

    let body = resp
      .text()
      .unwrap_or_else(|_| {
        "request failed".to_string()
      });
    warn!(
      what,
      status,
      "HTTP request rejected"
    );
    Err(classify_status(
      status, body, kind
    ))
  }

  fn send_json<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    kind: CallKind,
    what: &str
  ) -> Result<T, ErrorKind> {
    self
      .send(req, kind, what)?
      .json::<T>()
      .map_err(|e| {
        warn!(
          what,
          error = %e,
          "undecodable response"
        );
        ErrorKind::Decode(e.to_string())
      })
  }
}

/// `{base}/posts?page=..&size=..`
pub fn posts_url(
  base_url: &str,
  page: u32,
  size: u32
) -> Result<Url, ErrorKind> {
  let mut url = Url::parse(&format!(
    "{}/posts",
    base_url.trim_end_matches('/')
  ))
  .map_err(|e| {
    ErrorKind::Invalid(format!(
      "bad base url: {e}"
    ))
  })?;
  url
    .query_pairs_mut()
    .append_pair(
      "page",
      &page.to_string()
    )
    .append_pair(
      "size",
      &size.to_string()
    );
  Ok(url)
}

pub fn classify_transport(
  e: &reqwest::Error
) -> ErrorKind {
  if e.is_timeout() {
    ErrorKind::NetworkFailure(
      "request timed out".to_string()
    )
  } else if e.is_connect() {
    ErrorKind::NetworkFailure(
      "connection refused".to_string()
    )
  } else if e.is_decode() {
    ErrorKind::Decode(e.to_string())
  } else {
    ErrorKind::NetworkFailure(
      e.to_string()
    )
  }
}

pub fn classify_status(
  status: u16,
  body: String,
  kind: CallKind
) -> ErrorKind {
  match (status, kind) {
    | (403, CallKind::Delete) => {
      ErrorKind::NotOwner
    }
    | (401, _) | (403, _) => {
      ErrorKind::Unauthorized
    }
    | (404, _) => ErrorKind::NotFound,
    | (409, _) => ErrorKind::Conflict,
    | _ => {
      let message = body.trim();
      ErrorKind::Rejected {
        status,
        message: if message.is_empty() {
          "request failed".to_string()
        } else {
          message.to_string()
        }
      }
    }
  }
}

impl BlogApi for ReqwestBlogApi {
  fn fetch_posts(
    &self,
    page: u32,
    size: u32
  ) -> Result<PostPage, ErrorKind> {
    let url = posts_url(
      &self.base_url,
      page,
      size
    )?;
    self.send_json(
      self.client.get(url),
      CallKind::Read,
      "fetch posts"
    )
  }

  fn toggle_like(
    &self,
    id: PostId
  ) -> Result<(), ErrorKind> {
    self
      .send(
        self.client.post(
          self.url(&format!(
            "/posts/{id}/like"
          ))
        ),
        CallKind::Write,
        "toggle like"
      )
      .map(|_| ())
  }

  fn delete_post(
    &self,
    id: PostId
  ) -> Result<(), ErrorKind> {
    self
      .send(
        self.client.delete(
          self.url(&format!(
            "/posts/{id}"
          ))
        ),
        CallKind::Delete,
        "delete post"
      )
      .map(|_| ())
  }

  fn list_comments(
    &self,
    id: PostId
  ) -> Result<Vec<Comment>, ErrorKind> {
    self.send_json(
      self.client.get(self.url(&format!(
        "/posts/{id}/comments"
      ))),
      CallKind::Read,
      "list comments"
    )
  }

  fn add_comment(
    &self,
    id: PostId,
    content: &str
  ) -> Result<Comment, ErrorKind> {
    let body = CommentRequest {
      content: content.to_string()
    };
    self.send_json(
      self
        .client
        .post(self.url(&format!(
          "/posts/{id}/comments"
        )))
        .json(&body),
      CallKind::Write,
      "add comment"
    )
  }

  fn submit_report(
    &self,
    report: &ReportRequest
  ) -> Result<(), ErrorKind> {
    self
      .send(
        self
          .client
          .post(self.url("/reports"))
          .json(report),
        CallKind::Write,
        "submit report"
      )
      .map(|_| ())
  }

  fn list_notifications(
    &self
  ) -> Result<
    Vec<Notification>,
    ErrorKind
  > {
    self.send_json(
      self
        .client
        .get(self.url(
          "/notifications"
        )),
      CallKind::Read,
      "list notifications"
    )
  }

  fn mark_notification_read(
    &self,
    id: i64
  ) -> Result<(), ErrorKind> {
    self
      .send(
        self.client.patch(self.url(
          &format!(
            "/notifications/{id}/read"
          )
        )),
        CallKind::Write,
        "mark notification read"
      )
      .map(|_| ())
  }
}
