use super::KeyResult;
use crate::listing::{Listing, ALL};
use crate::ui::renderfns::truncate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Events emitted by the category bar that the parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryBarEvent {
  /// User moved to a different category tab
  SelectionChanged,
}

/// Handle category navigation keys against the listing state
pub fn handle_key(listing: &mut Listing, key: KeyEvent) -> KeyResult<CategoryBarEvent> {
  if listing.categories().len() < 2 {
    return KeyResult::NotHandled;
  }

  let forward = match key.code {
    KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => true,
    KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => false,
    // Jump back to the unfiltered tab
    KeyCode::Home => {
      if listing.filter() == ALL {
        return KeyResult::Handled;
      }
      listing.select(ALL);
      return KeyResult::Event(CategoryBarEvent::SelectionChanged);
    }
    _ => return KeyResult::NotHandled,
  };

  listing.cycle(forward);
  KeyResult::Event(CategoryBarEvent::SelectionChanged)
}

/// Render the category tabs, highlighting the active one
pub fn render(listing: &Listing, frame: &mut Frame, area: Rect) {
  let mut spans = vec![Span::styled("[category] ", Style::default().fg(Color::Yellow))];

  for (idx, category) in listing.categories().iter().enumerate() {
    if idx > 0 {
      spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    }
    let style = if idx == listing.selected_index() {
      Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {} ", truncate(&category.label, 18)), style));
  }

  frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
