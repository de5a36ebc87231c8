//! Clock abstraction (epoch
//! milliseconds).

pub trait Clock: Send + Sync {
  fn now_epoch_ms(&self) -> i64;
}
