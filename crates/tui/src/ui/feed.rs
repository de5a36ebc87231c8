//! The explore feed. Every entry takes
//! `ENTRY_ROWS` rows, followed by a
//! single footer row, so row positions
//! follow from entry indices.

use blogfeed_core::domain::load_state::LoadState;
use blogfeed_core::domain::model::{
  FeedEntry,
  format_count
};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{
  Color,
  Modifier,
  Style
};
use ratatui::text::{
  Line,
  Span
};
use ratatui::widgets::{
  Block,
  Borders,
  Paragraph
};

use crate::app::App;

pub(crate) const ENTRY_ROWS: u32 = 5;

const ROWS: usize = ENTRY_ROWS as usize;

pub(crate) fn draw_feed(
  frame: &mut Frame,
  area: Rect,
  app: &mut App
) {
  let block = Block::default()
    .borders(Borders::ALL)
    .title("Explore");
  let inner = block.inner(area);

  let lines = feed_lines(
    app,
    inner.width as usize
  );

  app.viewport.set_viewport_height(
    u32::from(inner.height)
  );
  let rows = lines.len() as u32;
  app.viewport.layout(rows);
  app
    .session
    .after_layout(&mut app.viewport);

  let top = app
    .viewport
    .top_row()
    .min(u16::MAX as u32) as u16;

  let widget = Paragraph::new(lines)
    .block(block)
    .scroll((top, 0));

  frame.render_widget(widget, area);
}

fn feed_lines(
  app: &App,
  width: usize
) -> Vec<Line<'static>> {
  let entries = app.visible_entries();
  let mut lines = Vec::with_capacity(
    entries.len() * ROWS + 1
  );

  for (idx, entry) in
    entries.iter().enumerate()
  {
    lines.extend(entry_lines(
      entry,
      idx == app.selected,
      width
    ));
  }

  let empty = entries.is_empty();
  lines.push(footer(app, empty));
  lines
}

fn entry_lines(
  entry: &FeedEntry,
  selected: bool,
  width: usize
) -> [Line<'static>; ROWS] {
  let title_style = if selected {
    Style::default()
      .fg(Color::Yellow)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default()
      .add_modifier(Modifier::BOLD)
  };
  let marker =
    if selected { "> " } else { "  " };

  let posted = entry
    .created_at
    .map(|at| {
      at.format("%b %e, %Y")
        .to_string()
    })
    .unwrap_or_default();

  let likes =
    format_count(entry.like_count);
  let like = if entry.is_liked {
    Span::styled(
      format!("♥ {likes}"),
      Style::default().fg(Color::Red)
    )
  } else {
    Span::raw(format!("♡ {likes}"))
  };
  let summary = entry
    .description
    .replace(['\n', '\r'], " ");
  let comments =
    format_count(entry.comment_count);
  let saved = if entry.is_saved {
    "  ★ saved"
  } else {
    ""
  };

  [
    Line::styled(
      truncate(
        &format!(
          "{marker}{}",
          entry.title
        ),
        width
      ),
      title_style
    ),
    Line::styled(
      truncate(
        &format!(
          "  {} · {} · {}",
          entry.author.display_name(),
          entry.topic,
          posted
        ),
        width
      ),
      Style::default()
        .fg(Color::DarkGray)
    ),
    Line::from(truncate(
      &format!("  {summary}"),
      width
    )),
    Line::from(vec![
      Span::raw("  "),
      like,
      Span::raw(format!(
        "  💬 {comments}{saved}"
      )),
    ]),
    Line::from("")
  ]
}

fn footer(
  app: &App,
  empty: bool
) -> Line<'static> {
  let store = app.session.store();
  let text = match store.load_state() {
    | LoadState::LoadingInitial => {
      "Loading posts..."
    }
    | LoadState::LoadingMore => {
      "Loading more posts..."
    }
    | LoadState::Error { .. } => {
      "Could not load posts. Scroll or \
       press retry."
    }
    | LoadState::Idle if empty => {
      "No posts in this category"
    }
    | LoadState::Idle
      if !store.cursor().has_more =>
    {
      "You're all caught up"
    }
    | LoadState::Idle => ""
  };
  Line::styled(
    text,
    Style::default().fg(Color::DarkGray)
  )
}

fn truncate(
  text: &str,
  width: usize
) -> String {
  if text.chars().count() <= width {
    return text.to_string();
  }
  let keep = width.saturating_sub(1);
  let mut out: String =
    text.chars().take(keep).collect();
  out.push('…');
  out
}
