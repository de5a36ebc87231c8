use blogfeed_core::domain::error::ErrorKind;
use blogfeed_core::domain::model::{
  FeedEntry,
  PostPage,
  PostResponse,
  ReportRequest
};
use blogfeed_core::infra::reqwest_api::{
  CallKind,
  classify_status,
  posts_url
};

const BASE: &str =
  "http://localhost:8080/api/";

fn status(
  code: u16,
  kind: CallKind
) -> ErrorKind {
  classify_status(
    code,
    String::new(),
    kind
  )
}

fn rejected(
  status: u16,
  message: &str
) -> ErrorKind {
  ErrorKind::Rejected {
    status,
    message: message.to_string()
  }
}

#[test]
fn posts_url_carries_page_and_size() {
  let url =
    posts_url(BASE, 2, 10).unwrap();
  assert_eq!(
    url.as_str(),
    "http://localhost:8080/api/posts\
     ?page=2&size=10"
  );
}

#[test]
fn posts_url_rejects_garbage_base() {
  assert!(matches!(
    posts_url("not a url", 0, 10),
    Err(ErrorKind::Invalid(_))
  ));
}

#[test]
fn forbidden_delete_means_not_owner() {
  assert_eq!(
    status(403, CallKind::Delete),
    ErrorKind::NotOwner
  );
  assert_eq!(
    status(403, CallKind::Write),
    ErrorKind::Unauthorized
  );
  assert_eq!(
    status(401, CallKind::Delete),
    ErrorKind::Unauthorized
  );
}

#[test]
fn statuses_map_to_error_kinds() {
  assert_eq!(
    status(404, CallKind::Read),
    ErrorKind::NotFound
  );
  assert_eq!(
    status(409, CallKind::Write),
    ErrorKind::Conflict
  );
  assert_eq!(
    classify_status(
      500,
      " boom \n".to_string(),
      CallKind::Read
    ),
    rejected(500, "boom")
  );
  assert_eq!(
    status(422, CallKind::Write),
    rejected(422, "request failed")
  );
}

#[test]
fn only_server_errors_are_transient() {
  assert!(
    status(503, CallKind::Read)
      .is_transient()
  );
  assert!(
    !status(400, CallKind::Read)
      .is_transient()
  );
  assert!(
    !ErrorKind::Unauthorized
      .is_transient()
  );
}

#[test]
fn post_page_decodes_backend_json() {
  let raw = r#"{
    "content": [{
      "id": 7,
      "title": "Rust at scale",
      "topic": "Tech",
      "banner": null,
      "description": "notes",
      "videos": [],
      "createdAt": "2024-03-01T10:15:00",
      "firstName": "Ada",
      "lastName": "Lovelace",
      "profilePic": null,
      "likeCount": 3,
      "commentCount": -1,
      "liked": true
    }],
    "currentPage": 0,
    "totalPages": 4,
    "hasNext": true
  }"#;

  let page: PostPage =
    serde_json::from_str(raw).unwrap();
  assert!(page.has_next);
  assert_eq!(page.total_pages, 4);

  let entry = FeedEntry::from_response(
    page.content[0].clone()
  );
  assert_eq!(entry.like_count, 3);
  assert_eq!(entry.comment_count, 0);
  assert!(entry.is_liked);
  assert_eq!(
    entry.author.display_name(),
    "Ada Lovelace"
  );
  assert!(entry.created_at.is_some());
}

#[test]
fn oversized_counts_saturate() {
  let raw = r#"{
    "id": 8,
    "likeCount": 4294967296,
    "commentCount": 9000000000
  }"#;

  let post: PostResponse =
    serde_json::from_str(raw).unwrap();
  let entry =
    FeedEntry::from_response(post);
  assert_eq!(
    entry.like_count,
    u32::MAX
  );
  assert_eq!(
    entry.comment_count,
    u32::MAX
  );
}

#[test]
fn report_uses_backend_names() {
  let report = ReportRequest::for_post(
    7, "Spam", "ads"
  );
  let json = serde_json::to_value(
    &report
  )
  .unwrap();
  assert_eq!(json["type"], "POST");
  assert_eq!(json["postId"], 7);
  assert_eq!(json["reason"], "Spam");
}
