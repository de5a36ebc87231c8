//! Domain models: feed entries, the
//! backend wire shapes, comments,
//! reports and notifications.

use chrono::NaiveDateTime;
use serde::{
  Deserialize,
  Serialize
};

pub type PostId = i64;

/// Topic filter for the explore view.
/// `All` disables filtering.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  #[default]
  All,
  Tech,
  Education,
  Products,
  Saas,
  Gaming
}

impl Category {
  pub const ALL: [Category; 6] = [
    Category::All,
    Category::Tech,
    Category::Education,
    Category::Products,
    Category::Saas,
    Category::Gaming
  ];

  pub fn label(self) -> &'static str {
    match self {
      | Category::All => "All",
      | Category::Tech => "Tech",
      | Category::Education => {
        "Education"
      }
      | Category::Products => {
        "Products"
      }
      | Category::Saas => "SaaS",
      | Category::Gaming => "Gaming"
    }
  }

  /// Case-insensitive topic match.
  pub fn matches(
    self,
    topic: &str
  ) -> bool {
    match self {
      | Category::All => true,
      | other => topic
        .trim()
        .eq_ignore_ascii_case(
          other.label()
        )
    }
  }

  pub fn next(self) -> Self {
    let len = Self::ALL.len();
    let idx = self.position() + 1;
    Self::ALL[idx % len]
  }

  pub fn prev(self) -> Self {
    let len = Self::ALL.len();
    let idx = self.position() + len - 1;
    Self::ALL[idx % len]
  }

  fn position(self) -> usize {
    Self::ALL
      .iter()
      .position(|c| *c == self)
      .unwrap_or(0)
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct Author {
  pub first_name:  String,
  pub last_name:   String,
  pub profile_pic: Option<String>
}

impl Author {
  pub fn display_name(&self) -> String {
    let name = format!(
      "{} {}",
      self.first_name, self.last_name
    );
    let name = name.trim();
    if name.is_empty() {
      "unknown author".to_string()
    } else {
      name.to_string()
    }
  }
}

/// One post as shown in the feed.
/// `saves` and `is_saved` exist only
/// on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
  pub id:            PostId,
  pub title:         String,
  pub topic:         String,
  pub banner:        Option<String>,
  pub description:   String,
  pub created_at:
    Option<NaiveDateTime>,
  pub author:        Author,
  pub like_count:    u32,
  pub comment_count: u32,
  pub is_liked:      bool,
  pub saves:         u32,
  pub is_saved:      bool
}

impl FeedEntry {
  pub fn from_response(
    post: PostResponse
  ) -> Self {
    Self {
      id:            post.id,
      title:         post.title,
      topic:         post.topic,
      banner:        post.banner,
      description:   post.description,
      created_at:    post.created_at,
      author:        Author {
        first_name:  post.first_name,
        last_name:   post.last_name,
        profile_pic: post.profile_pic
      },
      like_count:    saturate(
        post.like_count
      ),
      comment_count: saturate(
        post.comment_count
      ),
      is_liked:      post.is_liked,
      saves:         0,
      is_saved:      false
    }
  }
}

/// Negative counts read as zero,
/// oversized ones as `u32::MAX`.
fn saturate(count: i64) -> u32 {
  u32::try_from(count.max(0))
    .unwrap_or(u32::MAX)
}

/// Compact counter label: `999`, then
/// `1.0k`, `1.2k`, `12.5k`. Tenths
/// round half up.
pub fn format_count(
  count: u32
) -> String {
  if count < 1000 {
    return count.to_string();
  }
  let tenths =
    (u64::from(count) + 50) / 100;
  format!(
    "{}.{}k",
    tenths / 10,
    tenths % 10
  )
}

/// Field-wise merge applied by
/// `ListStore::update_entry`.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct EntryPatch {
  pub like_count:    Option<u32>,
  pub comment_count: Option<u32>,
  pub is_liked:      Option<bool>,
  pub saves:         Option<u32>,
  pub is_saved:      Option<bool>
}

impl EntryPatch {
  pub fn apply(
    self,
    entry: &mut FeedEntry
  ) {
    if let Some(count) = self.like_count
    {
      entry.like_count = count;
    }
    if let Some(count) =
      self.comment_count
    {
      entry.comment_count = count;
    }
    if let Some(liked) = self.is_liked {
      entry.is_liked = liked;
    }
    if let Some(saves) = self.saves {
      entry.saves = saves;
    }
    if let Some(saved) = self.is_saved {
      entry.is_saved = saved;
    }
  }
}

/// A post as the backend serialises it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
  pub id:            PostId,
  #[serde(default)]
  pub title:         String,
  #[serde(default)]
  pub topic:         String,
  #[serde(default)]
  pub banner:        Option<String>,
  #[serde(default)]
  pub description:   String,
  #[serde(default)]
  pub created_at:
    Option<NaiveDateTime>,
  #[serde(default)]
  pub first_name:    String,
  #[serde(default)]
  pub last_name:     String,
  #[serde(default)]
  pub profile_pic:   Option<String>,
  #[serde(default)]
  pub like_count:    i64,
  #[serde(default)]
  pub comment_count: i64,
  #[serde(
    default,
    rename = "isLiked",
    alias = "liked"
  )]
  pub is_liked:      bool
}

/// `GET /posts` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
  pub content:      Vec<PostResponse>,
  pub current_page: u32,
  #[serde(default)]
  pub total_pages:  u32,
  pub has_next:     bool
}

/// A page normalised into feed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage {
  pub entries:      Vec<FeedEntry>,
  pub current_page: u32,
  pub has_next:     bool
}

impl FeedPage {
  pub fn next_page(&self) -> u32 {
    self.current_page.saturating_add(1)
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
  pub id:          i64,
  pub content:     String,
  #[serde(default)]
  pub created_at:
    Option<NaiveDateTime>,
  #[serde(default)]
  pub first_name:  String,
  #[serde(default)]
  pub last_name:   String,
  #[serde(default)]
  pub profile_pic: Option<String>
}

impl Comment {
  pub fn author_name(&self) -> String {
    let author = Author {
      first_name:  self
        .first_name
        .clone(),
      last_name:   self
        .last_name
        .clone(),
      profile_pic: None
    };
    author.display_name()
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
  pub content: String
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportKind {
  Post,
  General,
  Profile
}

pub const REPORT_REASONS: [&str; 7] = [
  "Spam or misleading content",
  "Harassment or bullying",
  "Hate speech",
  "Violence or dangerous content",
  "Copyright infringement",
  "Privacy violation",
  "Other"
];

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
  #[serde(rename = "type")]
  pub kind:        ReportKind,
  pub reason:      String,
  pub description: String,
  #[serde(
    skip_serializing_if = "Option::is_none"
  )]
  pub post_id:     Option<PostId>
}

impl ReportRequest {
  pub fn for_post(
    post_id: PostId,
    reason: impl Into<String>,
    description: impl Into<String>
  ) -> Self {
    Self {
      kind:        ReportKind::Post,
      reason:      reason.into(),
      description: description.into(),
      post_id:     Some(post_id)
    }
  }

  /// Both free-text fields must carry
  /// something besides whitespace.
  pub fn validate(
    &self
  ) -> Result<(), String> {
    if self.reason.trim().is_empty() {
      return Err(
        "a report needs a reason"
          .to_string()
      );
    }
    let description =
      self.description.trim();
    if description.is_empty() {
      return Err(
        "a report needs a description"
          .to_string()
      );
    }
    Ok(())
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub id:                 i64,
  #[serde(rename = "type", default)]
  pub kind:               String,
  #[serde(default)]
  pub sender_id:          Option<i64>,
  #[serde(default)]
  pub sender_name:        String,
  #[serde(default)]
  pub sender_profile_pic:
    Option<String>,
  #[serde(default)]
  pub message:            String,
  #[serde(default, alias = "isRead")]
  pub read:               bool,
  #[serde(default)]
  pub created_at:
    Option<NaiveDateTime>
}
