//! `Clock` implementation backed by
//! `SystemTime`.

use std::time::{
  SystemTime,
  UNIX_EPOCH
};

use crate::ports::clock::Clock;

#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_epoch_ms(&self) -> i64 {
    let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .unwrap_or_default();
    now.as_millis() as i64
  }
}
