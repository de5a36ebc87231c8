//! Persisted bearer token lookup.

use std::env;
use std::fs;
use std::io::{
  self,
  ErrorKind
};
use std::path::Path;

use tracing::debug;

/// Environment first (when set and not
/// blank), then the token file. A
/// missing file is not an error.
pub fn load_token(
  env_var: Option<&str>,
  token_file: Option<&Path>
) -> io::Result<Option<String>> {
  if let Some(var) = env_var {
    if let Ok(value) = env::var(var) {
      let value = value.trim();
      if !value.is_empty() {
        debug!(
          var,
          "token from environment"
        );
        return Ok(Some(
          value.to_string()
        ));
      }
    }
  }

  let Some(path) = token_file else {
    return Ok(None);
  };

  match fs::read_to_string(path) {
    | Ok(raw) => {
      let token = raw.trim();
      if token.is_empty() {
        Ok(None)
      } else {
        debug!(
          path = %path.display(),
          "token from file"
        );
        Ok(Some(token.to_string()))
      }
    }
    | Err(e)
      if e.kind()
        == ErrorKind::NotFound =>
    {
      Ok(None)
    }
    | Err(e) => Err(e)
  }
}
