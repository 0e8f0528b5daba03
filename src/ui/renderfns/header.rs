use crate::ui::view::Shortcut;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with title, catalog source, and the current view's shortcuts
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str, source: &str, shortcuts: &[Shortcut]) {
  let mut spans = vec![
    Span::styled(format!(" {} ", title), Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", source), Style::default().fg(Color::White)),
    Span::raw(" "),
  ];

  let mut sorted: Vec<&Shortcut> = shortcuts.iter().collect();
  sorted.sort_by_key(|s| s.priority);

  // Shortcuts - keys and brackets highlighted, descriptions dimmed
  for shortcut in sorted {
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
      format!("<{}>", shortcut.key),
      Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
      format!(" {}", shortcut.label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}
