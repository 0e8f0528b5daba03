pub mod components;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Breadcrumb footer
    ])
    .split(frame.area());

  let shortcuts = app
    .current_view()
    .map(|view| view.shortcuts())
    .unwrap_or_default();
  renderfns::draw_header(frame, chunks[0], app.title(), app.source_label(), &shortcuts);

  if let Some(view) = app.current_view_mut() {
    view.render(frame, chunks[1]);
  }

  renderfns::draw_footer(frame, chunks[2], &app.breadcrumb(), app.status());

  // Command overlay goes on top of everything else
  app.command_input().render_overlay(frame, chunks[1]);
}

/// Keep a list selection inside `0..len`, selecting the first row when there is none
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    None => state.select(Some(0)),
    Some(idx) if idx >= len => state.select(Some(len - 1)),
    Some(_) => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_selection_defaults_to_first_row() {
    let mut state = ListState::default();
    ensure_valid_selection(&mut state, 3);
    assert_eq!(state.selected(), Some(0));
  }

  #[test]
  fn test_selection_clamped_after_shrink() {
    let mut state = ListState::default();
    state.select(Some(5));
    ensure_valid_selection(&mut state, 2);
    assert_eq!(state.selected(), Some(1));
  }

  #[test]
  fn test_selection_cleared_when_empty() {
    let mut state = ListState::default();
    state.select(Some(0));
    ensure_valid_selection(&mut state, 0);
    assert_eq!(state.selected(), None);
  }
}
