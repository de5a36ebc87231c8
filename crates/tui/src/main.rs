mod app;
mod config;
mod ui;

use std::io::{
  self,
  Stdout
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{
  Duration,
  Instant
};

use anyhow::{
  Context,
  Result
};
use blogfeed_core::infra::credentials::load_token;
use blogfeed_core::infra::logging::init_logging;
use blogfeed_core::infra::reqwest_api::ReqwestBlogApi;
use blogfeed_core::infra::system_clock::SystemClock;
use crossterm::event::{
  self,
  Event,
  KeyEventKind
};
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen,
  LeaveAlternateScreen,
  disable_raw_mode,
  enable_raw_mode
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::app::App;
use crate::config::{
  TuiConfig,
  default_config_path
};
use crate::ui::draw_main;

fn main() -> Result<()> {
  let config_path =
    resolve_config_path();
  let config =
    TuiConfig::load(&config_path)
      .with_context(|| {
        format!(
          "load config: {}",
          config_path.display()
        )
      })?;
  let keys = config
    .resolved_keybindings()
    .with_context(|| {
      "resolve keybindings"
    })?;

  let log_file = config.log_file();
  init_logging(
    &config.logging.level,
    log_file.as_deref()
  )
  .context("init logging")?;

  let token_file = config.token_file();
  let token = load_token(
    config.auth.token_env.as_deref(),
    token_file.as_deref()
  )
  .context("read token")?;
  if token.is_none() {
    info!(
      "no token configured, requests \
       go out anonymous"
    );
  }

  let api = ReqwestBlogApi::new(
    &config.server.url,
    token,
    Duration::from_millis(
      config.server.timeout_ms
    )
  )
  .context("build HTTP client")?;

  let mut app = App::new(
    &config,
    keys,
    Arc::new(api),
    Arc::new(SystemClock)
  );

  enable_raw_mode()?;

  let mut stdout = io::stdout();

  execute!(
    stdout,
    EnterAlternateScreen
  )?;

  let backend =
    CrosstermBackend::new(stdout);

  let mut terminal =
    Terminal::new(backend)?;

  app.start();

  let tick_rate = Duration::from_millis(
    config.ui.tick_ms
  );

  let res = run_app(
    &mut terminal,
    &mut app,
    tick_rate
  );

  disable_raw_mode()?;

  execute!(
    terminal.backend_mut(),
    LeaveAlternateScreen
  )?;

  terminal.show_cursor()?;

  res
}

fn resolve_config_path() -> PathBuf {
  if let Some(path) =
    std::env::args().nth(1)
  {
    return PathBuf::from(path);
  }

  if let Ok(path) =
    std::env::var("BLOGFEED_TUI_CONFIG")
  {
    return PathBuf::from(path);
  }

  default_config_path()
}

fn run_app(
  terminal: &mut Terminal<
    CrosstermBackend<Stdout>
  >,
  app: &mut App,
  tick_rate: Duration
) -> Result<()> {
  let mut last_tick = Instant::now();
  loop {
    terminal.draw(|frame| {
      draw_main(frame, app)
    })?;

    let timeout = tick_rate
      .saturating_sub(
        last_tick.elapsed()
      );

    if event::poll(timeout)? {
      if let Event::Key(key) =
        event::read()?
      {
        let pressed = key.kind
          == KeyEventKind::Press;
        if pressed
          && app.handle_key(key)?
        {
          return Ok(());
        }
      }
    }

    if last_tick.elapsed() >= tick_rate
    {
      app.on_tick();
      last_tick = Instant::now();
    }
  }
}
