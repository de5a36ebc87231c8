use blogfeed_core::domain::model::REPORT_REASONS;
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
  Clear,
  List,
  ListItem,
  ListState,
  Paragraph,
  Wrap
};

use crate::app::{
  App,
  ModalState,
  ReportField
};

pub(crate) fn draw_modal(
  frame: &mut Frame,
  app: &App,
  modal: &ModalState
) {
  match modal {
    | ModalState::ConfirmDelete {
      title,
      ..
    } => {
      let lines = vec![
        Line::from(format!(
          "Delete \"{title}\"?"
        )),
        Line::from(""),
        Line::from(
          "y to delete, n or Esc to keep"
        ),
      ];
      draw_text_modal(
        frame,
        "Delete post",
        lines,
        40
      );
    }
    | ModalState::Comments {
      post_id,
      title,
      draft
    } => {
      let mut lines = match app
        .session
        .comments(*post_id)
      {
        | Some([]) => {
          vec![Line::from(
            "No comments yet"
          )]
        }
        | Some(comments) => comments
          .iter()
          .map(|c| {
            Line::from(format!(
              "{}: {}",
              c.author_name(),
              c.content
            ))
          })
          .collect(),
        | None => {
          vec![Line::from(
            "Loading comments..."
          )]
        }
      };
      lines.push(Line::from(""));
      lines.push(Line::styled(
        format!("> {draft}"),
        Style::default()
          .fg(Color::Yellow)
      ));
      lines.push(Line::from(
        "Enter to post, Esc to close"
      ));
      draw_text_modal(
        frame, title, lines, 70
      );
    }
    | ModalState::Report {
      reason,
      description,
      field,
      ..
    } => {
      draw_report(
        frame,
        *reason,
        description,
        *field
      );
    }
    | ModalState::Notifications {
      selected
    } => {
      let options = app
        .ctx
        .notifications()
        .iter()
        .map(|row| {
          let dot = if row.read {
            " "
          } else {
            "•"
          };
          format!(
            "{dot} {} {}",
            row.sender_name,
            row.message
          )
        })
        .collect::<Vec<_>>();
      let area = centered_rect(
        60,
        60,
        frame.area()
      );
      draw_modal_list(
        frame,
        "Notifications (Enter marks \
         read)",
        &options,
        *selected,
        area
      );
    }
  }
}

fn draw_report(
  frame: &mut Frame,
  reason: usize,
  description: &str,
  field: ReportField
) {
  let area =
    centered_rect(60, 70, frame.area());
  frame.render_widget(Clear, area);

  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Min(3),
      Constraint::Length(5)
    ])
    .split(area);

  let options = REPORT_REASONS
    .iter()
    .map(|r| r.to_string())
    .collect::<Vec<_>>();
  draw_modal_list(
    frame,
    "Report post: reason (Tab \
     switches)",
    &options,
    reason,
    chunks[0]
  );

  let style = match field {
    | ReportField::Description => {
      Style::default().fg(Color::Yellow)
    }
    | ReportField::Reason => {
      Style::default()
    }
  };
  let widget = Paragraph::new(vec![
    Line::styled(
      format!("> {description}"),
      style
    ),
    Line::from(
      "Enter to submit, Esc to cancel"
    ),
  ])
  .block(
    Block::default()
      .borders(Borders::ALL)
      .title("Description")
  )
  .wrap(Wrap {
    trim: false
  });
  frame
    .render_widget(widget, chunks[1]);
}

fn draw_modal_list(
  frame: &mut Frame,
  title: &str,
  options: &[String],
  selected: usize,
  area: Rect
) {
  frame.render_widget(Clear, area);

  let items = options
    .iter()
    .map(|opt| {
      ListItem::new(opt.clone())
    })
    .collect::<Vec<_>>();

  let list = List::new(items)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title(title)
    )
    .highlight_style(
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
    )
    .highlight_symbol("> ");

  let mut state = ListState::default();
  if !options.is_empty() {
    state.select(Some(
      selected.min(options.len() - 1)
    ));
  }

  frame.render_stateful_widget(
    list, area, &mut state
  );
}

fn draw_text_modal(
  frame: &mut Frame,
  title: &str,
  lines: Vec<Line<'_>>,
  percent_y: u16
) {
  let area = centered_rect(
    60,
    percent_y,
    frame.area()
  );

  frame.render_widget(Clear, area);

  let widget = Paragraph::new(lines)
    .block(
      Block::default()
        .borders(Borders::ALL)
        .title(title)
    )
    .wrap(Wrap {
      trim: true
    });

  frame.render_widget(widget, area);
}

fn centered_rect(
  percent_x: u16,
  percent_y: u16,
  rect: Rect
) -> Rect {
  let popup_layout = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage(
        (100 - percent_y) / 2
      ),
      Constraint::Percentage(percent_y),
      Constraint::Percentage(
        (100 - percent_y) / 2
      )
    ])
    .split(rect);

  let vertical = popup_layout[1];

  let horizontal_layout =
    Layout::default()
      .direction(Direction::Horizontal)
      .constraints([
        Constraint::Percentage(
          (100 - percent_x) / 2
        ),
        Constraint::Percentage(
          percent_x
        ),
        Constraint::Percentage(
          (100 - percent_x) / 2
        )
      ])
      .split(vertical);

  horizontal_layout[1]
}
