use std::path::{
  Path,
  PathBuf
};

use blogfeed_core::infra::settings::FeedSettings;
use crossterm::event::{
  KeyCode,
  KeyModifiers
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TuiConfig {
  pub(crate) server:      ServerConfig,
  #[serde(default)]
  pub(crate) auth:        AuthConfig,
  #[serde(default)]
  pub(crate) feed:        FeedSettings,
  pub(crate) ui:          UiConfig,
  pub(crate) logging:     LoggingConfig,
  pub(crate) keybindings: Keybindings
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServerConfig {
  pub(crate) url:        String,
  pub(crate) timeout_ms: u64
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthConfig {
  pub(crate) token_env:  Option<String>,
  pub(crate) token_file: Option<String>
}

#[derive(Debug, Deserialize)]
pub(crate) struct UiConfig {
  pub(crate) tick_ms:       u64,
  #[serde(
    default = "default_notice_ttl"
  )]
  pub(crate) notice_ttl_ms: u64
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoggingConfig {
  pub(crate) level: String,
  pub(crate) file:  Option<String>
}

#[derive(Debug, Deserialize)]
pub(crate) struct Keybindings {
  pub(crate) quit: String,
  pub(crate) reload: String,
  pub(crate) retry: String,
  pub(crate) move_down: String,
  pub(crate) move_up: String,
  pub(crate) page_down: String,
  pub(crate) page_up: String,
  pub(crate) go_top: String,
  pub(crate) go_bottom: String,
  pub(crate) next_category: String,
  pub(crate) prev_category: String,
  pub(crate) like: String,
  pub(crate) save: String,
  pub(crate) delete: String,
  pub(crate) comments: String,
  pub(crate) report: String,
  pub(crate) notifications: String
}

#[derive(Debug, Clone)]
pub(crate) struct KeyBinding {
  pub(crate) code:      KeyCode,
  pub(crate) modifiers: KeyModifiers
}

pub(crate) struct ResolvedKeybindings {
  pub(crate) quit: KeyBinding,
  pub(crate) reload: KeyBinding,
  pub(crate) retry: KeyBinding,
  pub(crate) move_down: KeyBinding,
  pub(crate) move_up: KeyBinding,
  pub(crate) page_down: KeyBinding,
  pub(crate) page_up: KeyBinding,
  pub(crate) go_top: KeyBinding,
  pub(crate) go_bottom: KeyBinding,
  pub(crate) next_category: KeyBinding,
  pub(crate) prev_category: KeyBinding,
  pub(crate) like: KeyBinding,
  pub(crate) save: KeyBinding,
  pub(crate) delete: KeyBinding,
  pub(crate) comments: KeyBinding,
  pub(crate) report: KeyBinding,
  pub(crate) notifications: KeyBinding
}

#[derive(Debug)]
pub(crate) struct ConfigError(
  pub(crate) String
);

impl std::fmt::Display for ConfigError {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl std::error::Error
  for ConfigError
{
}

impl TuiConfig {
  pub(crate) fn load(
    path: &Path
  ) -> Result<Self, ConfigError> {
    let base_dir = path
      .parent()
      .ok_or_else(|| {
        ConfigError(
          "config path has no parent"
            .into()
        )
      })?;

    let schema_path = base_dir
      .join("schemas")
      .join("tui.schema.json");

    let schema =
      std::fs::read_to_string(
        &schema_path
      )
      .map_err(|_| {
        ConfigError(format!(
          "schema not found at {}",
          schema_path.display()
        ))
      })?;

    let content =
      std::fs::read_to_string(path)
        .map_err(|e| {
          ConfigError(format!(
            "config IO error: {e}"
          ))
        })?;

    validate_toml(
      &schema,
      &content,
      &path.display().to_string()
    )?;

    let config: TuiConfig =
      toml::from_str(&content)
        .map_err(|e| {
          ConfigError(format!(
            "config parse error: {e}"
          ))
        })?;

    Ok(config)
  }

  pub(crate) fn resolved_keybindings(
    &self
  ) -> Result<
    ResolvedKeybindings,
    ConfigError
  > {
    let keys = &self.keybindings;
    Ok(ResolvedKeybindings {
      quit:          parse_key(
        &keys.quit
      )?,
      reload:        parse_key(
        &keys.reload
      )?,
      retry:         parse_key(
        &keys.retry
      )?,
      move_down:     parse_key(
        &keys.move_down
      )?,
      move_up:       parse_key(
        &keys.move_up
      )?,
      page_down:     parse_key(
        &keys.page_down
      )?,
      page_up:       parse_key(
        &keys.page_up
      )?,
      go_top:        parse_key(
        &keys.go_top
      )?,
      go_bottom:     parse_key(
        &keys.go_bottom
      )?,
      next_category: parse_key(
        &keys.next_category
      )?,
      prev_category: parse_key(
        &keys.prev_category
      )?,
      like:          parse_key(
        &keys.like
      )?,
      save:          parse_key(
        &keys.save
      )?,
      delete:        parse_key(
        &keys.delete
      )?,
      comments:      parse_key(
        &keys.comments
      )?,
      report:        parse_key(
        &keys.report
      )?,
      notifications: parse_key(
        &keys.notifications
      )?
    })
  }

  pub(crate) fn token_file(
    &self
  ) -> Option<PathBuf> {
    self
      .auth
      .token_file
      .as_deref()
      .map(expand_home)
  }

  pub(crate) fn log_file(
    &self
  ) -> Option<PathBuf> {
    self
      .logging
      .file
      .as_deref()
      .map(expand_home)
  }
}

pub(crate) fn default_config_path()
-> PathBuf {
  PathBuf::from(
    "crates/tui/res/config.toml"
  )
}

fn default_notice_ttl() -> u64 {
  4_000
}

/// `~/` is resolved against `$HOME`;
/// anything else is taken as written.
fn expand_home(raw: &str) -> PathBuf {
  match raw.strip_prefix("~/") {
    | Some(rest) => {
      match std::env::var_os("HOME") {
        | Some(home) => {
          PathBuf::from(home).join(rest)
        }
        | None => PathBuf::from(raw)
      }
    }
    | None => PathBuf::from(raw)
  }
}

fn validate_toml(
  schema: &str,
  toml_input: &str,
  name: &str
) -> Result<(), ConfigError> {
  let schema_json: serde_json::Value =
    serde_json::from_str(schema)
      .map_err(|e| {
        ConfigError(format!(
          "schema parse error: {e}"
        ))
      })?;

  let compiled =
    jsonschema::validator_for(
      &schema_json
    )
    .map_err(|e| {
      ConfigError(format!(
        "schema compile error: {e}"
      ))
    })?;

  let toml_value: toml::Value =
    toml::from_str(toml_input)
      .map_err(|e| {
        ConfigError(format!(
          "{name}: {e}"
        ))
      })?;

  let json_value =
    serde_json::to_value(toml_value)
      .map_err(|e| {
        ConfigError(e.to_string())
      })?;

  let mut errors =
    compiled.iter_errors(&json_value);

  if let Some(err) = errors.next() {
    let mut messages =
      vec![err.to_string()];
    for e in errors.take(4) {
      messages.push(e.to_string());
    }

    return Err(ConfigError(format!(
      "schema validation failed for \
       {name}: {}",
      messages.join("; ")
    )));
  }

  Ok(())
}

fn parse_key(
  raw: &str
) -> Result<KeyBinding, ConfigError> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Err(ConfigError(
      "empty keybinding".into()
    ));
  }

  let mut modifiers =
    KeyModifiers::NONE;
  let mut key = raw;

  if let Some(rest) =
    key.strip_prefix("ctrl+")
  {
    modifiers |= KeyModifiers::CONTROL;
    key = rest;
  }

  let code = match key {
    | "left" => KeyCode::Left,
    | "right" => KeyCode::Right,
    | "up" => KeyCode::Up,
    | "down" => KeyCode::Down,
    | "tab" => KeyCode::Tab,
    | "enter" => KeyCode::Enter,
    | "pageup" => KeyCode::PageUp,
    | "pagedown" => KeyCode::PageDown,
    | "home" => KeyCode::Home,
    | "end" => KeyCode::End,
    | _ => {
      let mut chars = key.chars();
      let first = chars.next();
      match (first, chars.next()) {
        | (Some(ch), None) => {
          if ch.is_ascii_uppercase() {
            modifiers |=
              KeyModifiers::SHIFT;
          }
          KeyCode::Char(ch)
        }
        | _ => {
          return Err(ConfigError(
            format!(
              "unsupported keybinding \
               '{raw}'"
            )
          ));
        }
      }
    }
  };

  Ok(KeyBinding {
    code,
    modifiers
  })
}
