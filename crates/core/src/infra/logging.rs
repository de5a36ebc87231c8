use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum BootError {
  #[error("invalid log level: {0}")]
  Level(String),
  #[error("log file {path}: {source}")]
  File {
    path:   String,
    source: std::io::Error
  }
}

/// The terminal belongs to the UI, so
/// records go to `file` (or nowhere).
pub fn init_logging(
  level: &str,
  file: Option<&Path>
) -> Result<(), BootError> {
  // Base level from config, still
  // overridable via RUST_LOG.
  let level = level.trim();
  let default = format!(
    "{level},blogfeed_core={level},\
     blogfeed_tui={level},reqwest=warn"
  );
  let from_env =
    EnvFilter::try_from_default_env();
  let filter = match from_env {
    | Ok(filter) => filter,
    | Err(_) => EnvFilter::try_new(
      &default
    )
    .map_err(|e| {
      BootError::Level(format!(
        "{level}: {e}"
      ))
    })?
  };

  let builder = fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_level(true)
    .with_thread_names(true)
    .with_ansi(false);

  match file {
    | Some(path) => {
      let handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
          BootError::File {
            path: path
              .display()
              .to_string(),
            source
          }
        })?;
      builder
        .with_writer(Mutex::new(handle))
        .init();
    }
    | None => {
      builder
        .with_writer(std::io::sink)
        .init();
    }
  }

  Ok(())
}
