pub(crate) mod feed;
mod modal;

use blogfeed_core::app::context::NoticeLevel;
use blogfeed_core::domain::model::Category;
use ratatui::Frame;
use ratatui::layout::{
  Constraint,
  Direction,
  Layout,
  Rect
};
use ratatui::style::{
  Color,
  Modifier,
  Style
};
use ratatui::text::Line;
use ratatui::widgets::{
  Block,
  Borders,
  Paragraph,
  Tabs
};

use crate::app::App;

/// Takes the app mutably: the feed
/// viewport is measured and
/// scroll-compensated while drawing.
pub(crate) fn draw_main(
  frame: &mut Frame,
  app: &mut App
) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3),
      Constraint::Min(3),
      Constraint::Length(3)
    ])
    .split(frame.area());

  let titles = Category::ALL
    .iter()
    .map(|c| {
      Line::styled(
        c.label(),
        Style::default()
          .fg(Color::White)
      )
    })
    .collect::<Vec<_>>();

  let selected = Category::ALL
    .iter()
    .position(|c| {
      *c == app.session.category()
    })
    .unwrap_or(0);

  let unread = app.ctx.unread_count();
  let title = if unread > 0 {
    format!(
      "blogfeed | {unread} unread"
    )
  } else {
    "blogfeed".to_string()
  };

  let tabs = Tabs::new(titles)
    .select(selected)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title(title)
    )
    .highlight_style(
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
    );

  frame.render_widget(tabs, chunks[0]);

  feed::draw_feed(
    frame, chunks[1], app
  );

  draw_status(frame, chunks[2], app);

  if let Some(modal) = &app.modal {
    modal::draw_modal(
      frame, app, modal
    );
  }
}

fn draw_status(
  frame: &mut Frame,
  area: Rect,
  app: &App
) {
  let store = app.session.store();
  let cursor = store.cursor();
  let summary = format!(
    "{} | page {} | {}/{} posts{}",
    store.load_state().label(),
    cursor.current_page,
    app.visible_entries().len(),
    store.len(),
    if cursor.has_more {
      ""
    } else {
      " | end of feed"
    }
  );

  let line = match &app.notice {
    | Some((notice, _)) => {
      let color = match notice.level {
        | NoticeLevel::Info => {
          Color::Green
        }
        | NoticeLevel::Error => {
          Color::Red
        }
      };
      Line::styled(
        notice.text.clone(),
        Style::default().fg(color)
      )
    }
    | None => Line::from("")
  };

  let widget = Paragraph::new(line)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title(summary)
    );

  frame.render_widget(widget, area);
}
