use std::fs;

use blogfeed_core::domain::model::Category;
use blogfeed_core::infra::credentials::load_token;
use blogfeed_core::infra::settings::FeedSettings;
use tempfile::tempdir;

#[test]
fn missing_feed_keys_use_defaults() {
  let settings: FeedSettings =
    toml::from_str("page_size = 25")
      .unwrap();

  assert_eq!(settings.page_size, 25);
  assert_eq!(
    settings.load_threshold,
    100
  );
  assert_eq!(
    settings.sample_interval_ms,
    200
  );
  assert_eq!(
    settings.category,
    Category::All
  );
}

#[test]
fn category_is_read_in_lowercase() {
  let raw = "category = \"saas\"";
  let settings: FeedSettings =
    toml::from_str(raw).unwrap();
  assert_eq!(
    settings.category,
    Category::Saas
  );
  let unknown = toml::from_str::<
    FeedSettings
  >("category = \"Fashion\"");
  assert!(unknown.is_err());
}

#[test]
fn category_cycle_wraps_around() {
  assert_eq!(
    Category::Gaming.next(),
    Category::All
  );
  assert_eq!(
    Category::All.prev(),
    Category::Gaming
  );
  for category in Category::ALL {
    assert_eq!(
      category.next().prev(),
      category
    );
  }
}

#[test]
fn token_file_is_trimmed() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("token");
  fs::write(&path, "  abc.def \n")
    .unwrap();

  let token =
    load_token(None, Some(&path))
      .unwrap();
  assert_eq!(
    token.as_deref(),
    Some("abc.def")
  );
}

#[test]
fn blank_token_file_is_anonymous() {
  let dir = tempdir().unwrap();
  let missing = dir.path().join("nope");
  assert_eq!(
    load_token(None, Some(&missing))
      .unwrap(),
    None
  );

  let blank = dir.path().join("blank");
  fs::write(&blank, "\n").unwrap();
  assert_eq!(
    load_token(None, Some(&blank))
      .unwrap(),
    None
  );
  assert_eq!(
    load_token(None, None).unwrap(),
    None
  );
}

#[test]
fn environment_token_wins_over_file() {
  let dir = tempdir().unwrap();
  let path = dir.path().join("token");
  fs::write(&path, "from-file")
    .unwrap();

  let var = "BLOGFEED_TEST_TOKEN_WINS";
  std::env::set_var(var, "from-env");
  let token =
    load_token(Some(var), Some(&path))
      .unwrap();
  std::env::remove_var(var);
  assert_eq!(
    token.as_deref(),
    Some("from-env")
  );

  let unset =
    "BLOGFEED_TEST_TOKEN_UNSET";
  let token =
    load_token(Some(unset), Some(&path))
      .unwrap();
  assert_eq!(
    token.as_deref(),
    Some("from-file")
  );
}
