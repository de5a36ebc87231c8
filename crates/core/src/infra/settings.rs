//! Feed tuning knobs, embedded in the
//! front end's config file.

use serde::Deserialize;

use crate::domain::model::Category;
use crate::domain::scroll::{
  DEFAULT_LOAD_THRESHOLD,
  DEFAULT_SAMPLE_INTERVAL_MS
};

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
  #[serde(
    default = "default_page_size"
  )]
  pub page_size:          u32,
  #[serde(
    default = "default_load_threshold"
  )]
  pub load_threshold:     u32,
  #[serde(
    default = "default_sample_interval_ms"
  )]
  pub sample_interval_ms: u64,
  #[serde(default)]
  pub category:           Category
}

impl Default for FeedSettings {
  fn default() -> Self {
    Self {
      page_size:
        default_page_size(),
      load_threshold:
        default_load_threshold(),
      sample_interval_ms:
        default_sample_interval_ms(),
      category:           Category::All
    }
  }
}

fn default_page_size() -> u32 {
  10
}

fn default_load_threshold() -> u32 {
  DEFAULT_LOAD_THRESHOLD
}

fn default_sample_interval_ms() -> u64 {
  DEFAULT_SAMPLE_INTERVAL_MS
}
