use crate::detail::{DetailState, FAILED_MESSAGE};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

/// Copy for a detail page whose record does not exist
pub struct NotFound {
  pub title: &'static str,
  pub hint: &'static str,
  /// Where `q` leads, e.g. "the App Store"
  pub back_to: &'static str,
}

/// Draw the loading, absent or failed state of a detail page.
///
/// Returns false for a resolved record, leaving the area for the caller.
pub fn draw_unresolved<T>(
  frame: &mut Frame,
  area: Rect,
  state: &DetailState<T>,
  not_found: &NotFound,
) -> bool {
  let lines = match state {
    DetailState::Resolved(_) => return false,
    DetailState::Loading => vec![Line::styled(
      "Loading...",
      Style::default().fg(Color::DarkGray),
    )],
    DetailState::Absent => vec![
      Line::raw(""),
      Line::styled(not_found.title, Style::default().fg(Color::White).bold()),
      Line::styled(not_found.hint, Style::default().fg(Color::DarkGray)),
      Line::raw(""),
      Line::from(vec![
        Span::styled("<q>", Style::default().fg(Color::Cyan)),
        Span::raw(format!(" return to {}", not_found.back_to)),
      ]),
    ],
    DetailState::Failed(error) => vec![
      Line::raw(""),
      Line::styled(FAILED_MESSAGE, Style::default().fg(Color::Red).bold()),
      Line::styled(format!("Error: {}", error), Style::default().fg(Color::Red)),
      Line::raw(""),
      Line::from(vec![
        Span::styled("<r>", Style::default().fg(Color::Cyan)),
        Span::raw(" retry"),
      ]),
    ],
  };

  let paragraph = Paragraph::new(lines)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: false });
  frame.render_widget(paragraph, area);
  true
}
