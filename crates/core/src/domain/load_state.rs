//! Load state machine for one feed
//! session. At most one page request is
//! ever in flight.

use super::error::ErrorKind;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum LoadKind {
  Initial,
  More
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
  Idle,
  LoadingInitial,
  LoadingMore,
  Error {
    during: LoadKind,
    error:  ErrorKind
  }
}

impl LoadState {
  pub fn is_loading(&self) -> bool {
    matches!(
      self,
      LoadState::LoadingInitial
        | LoadState::LoadingMore
    )
  }

  pub fn in_flight(
    &self
  ) -> Option<LoadKind> {
    match self {
      | LoadState::LoadingInitial => {
        Some(LoadKind::Initial)
      }
      | LoadState::LoadingMore => {
        Some(LoadKind::More)
      }
      | _ => None
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      | LoadState::Idle => "idle",
      | LoadState::LoadingInitial => {
        "loading"
      }
      | LoadState::LoadingMore => {
        "loading more"
      }
      | LoadState::Error { .. } => {
        "error"
      }
    }
  }
}

/// Outcome of asking the machine to
/// start a load.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Begin {
  Started(LoadKind),
  Busy,
  Exhausted
}

#[derive(Debug, Clone)]
pub struct Loader {
  state: LoadState
}

impl Default for Loader {
  fn default() -> Self {
    Self {
      state: LoadState::Idle
    }
  }
}

impl Loader {
  pub fn state(&self) -> &LoadState {
    &self.state
  }

  pub fn reset(&mut self) {
    self.state = LoadState::Idle;
  }

  /// Mount, reload and category
  /// change all land here. Any
  /// in-flight request is superseded by
  /// the caller bumping its generation.
  pub fn begin_initial(&mut self) {
    self.state =
      LoadState::LoadingInitial;
  }

  /// The backpressure rule: load-more
  /// only from `Idle` (or a failed
  /// load-more), and only while more
  /// pages exist.
  pub fn begin_more(
    &mut self,
    has_more: bool
  ) -> Begin {
    match &self.state {
      | LoadState::LoadingInitial
      | LoadState::LoadingMore => {
        Begin::Busy
      }
      | LoadState::Error {
        during: LoadKind::Initial,
        ..
      } => {
        self.state =
          LoadState::LoadingInitial;
        Begin::Started(
          LoadKind::Initial
        )
      }
      | LoadState::Idle
      | LoadState::Error { .. } => {
        if !has_more {
          return Begin::Exhausted;
        }
        self.state =
          LoadState::LoadingMore;
        Begin::Started(LoadKind::More)
      }
    }
  }

  /// Re-enter whichever load failed.
  /// Outside `Error` this is a no-op.
  pub fn retry(
    &mut self,
    has_more: bool
  ) -> Option<LoadKind> {
    match &self.state {
      | LoadState::Error {
        during: LoadKind::Initial,
        ..
      } => {
        self.state =
          LoadState::LoadingInitial;
        Some(LoadKind::Initial)
      }
      | LoadState::Error {
        during: LoadKind::More,
        ..
      } if has_more => {
        self.state =
          LoadState::LoadingMore;
        Some(LoadKind::More)
      }
      | _ => None
    }
  }

  pub fn complete(&mut self) {
    self.state = LoadState::Idle;
  }

  /// Leaves `Loading*` for `Error`.
  /// Returns `false` when nothing was
  /// in flight.
  pub fn fail(
    &mut self,
    error: ErrorKind
  ) -> bool {
    let Some(during) =
      self.state.in_flight()
    else {
      return false;
    };
    self.state = LoadState::Error {
      during,
      error
    };
    true
  }
}
