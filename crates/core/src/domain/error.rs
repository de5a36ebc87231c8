//! Error taxonomy shared by the
//! fetcher, the reconciler and the
//! backend client.

use thiserror::Error;

use super::load_state::LoadState;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum ErrorKind {
  #[error("network failure: {0}")]
  NetworkFailure(String),
  #[error("credentials rejected")]
  Unauthorized,
  #[error("only the author can do that")]
  NotOwner,
  #[error("no longer exists")]
  NotFound,
  #[error("conflicting update")]
  Conflict,
  #[error(
    "request rejected ({status}): \
     {message}"
  )]
  Rejected {
    status:  u16,
    message: String
  },
  #[error("unreadable response: {0}")]
  Decode(String),
  #[error("{0}")]
  Invalid(String)
}

impl ErrorKind {
  /// Failures the user can clear by
  /// simply trying again.
  pub fn is_transient(&self) -> bool {
    matches!(
      self,
      ErrorKind::NetworkFailure(_)
        | ErrorKind::Conflict
    ) || matches!(
      self,
      ErrorKind::Rejected { status, .. }
        if *status >= 500
    )
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum StoreError {
  #[error(
    "page appended while {0:?}; a load \
     must be in flight"
  )]
  NotLoading(LoadState)
}
