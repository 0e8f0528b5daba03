use std::marker::PhantomData;

use crate::cache::QueryCache;
use crate::detail::FAILED_MESSAGE;
use crate::listing::{Category, EmptyState, Listing, Presentation};
use crate::query::{Query, QueryState};
use crate::source::ResourceEntry;
use crate::ui::components::{category_bar, KeyResult};
use crate::ui::ensure_valid_selection;
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

const CARD_HEIGHT: u16 = 6;

/// A record kind that can be shown in a [`ListingView`]
pub trait ListingEntry: ResourceEntry {
  /// Breadcrumb and block title
  const HEADING: &'static str;
  const EMPTY: EmptyState;

  /// Category tabs for the fetched records
  fn categories(records: &[Self]) -> Vec<Category>;

  /// One line in the compact list
  fn list_line(&self) -> Line<'static>;

  fn card_title(&self) -> String;

  /// Body lines of a card
  fn card_lines(&self) -> Vec<Line<'static>>;

  /// Detail view for the record with `id`
  fn open(cache: &QueryCache, id: u32) -> Box<dyn View>;
}

/// Filterable, expandable listing of one collection
pub struct ListingView<T: ListingEntry> {
  cache: QueryCache,
  query: Query<Option<Vec<T>>>,
  listing: Listing,
  list_state: ListState,
  _entry: PhantomData<T>,
}

impl<T: ListingEntry> ListingView<T> {
  pub fn new(cache: QueryCache, page_size: usize) -> Self {
    let cache_for_query = cache.clone();
    let mut query = Query::new(move || {
      let cache = cache_for_query.clone();
      async move { cache.fetch_list::<T>().await }
    });

    // Start fetching immediately
    query.fetch();

    Self {
      cache,
      query,
      listing: Listing::new(T::categories(&[]), page_size),
      list_state: ListState::default(),
      _entry: PhantomData,
    }
  }

  fn records(&self) -> &[T] {
    self
      .query
      .data()
      .and_then(|records| records.as_deref())
      .unwrap_or(&[])
  }

  fn visible_len(&self) -> usize {
    self.listing.visible(self.records()).len()
  }

  fn selected_id(&self) -> Option<u32> {
    let idx = self.list_state.selected()?;
    self.listing.visible(self.records()).get(idx).map(|record| record.id())
  }

  fn title(&self) -> String {
    let label = self
      .listing
      .categories()
      .get(self.listing.selected_index())
      .map(|c| c.label.as_str())
      .unwrap_or(T::HEADING);

    match self.query.state() {
      QueryState::Idle | QueryState::Loading => format!(" {} (loading...) ", T::HEADING),
      QueryState::Error(_) => format!(" {} (error) ", T::HEADING),
      _ => {
        let total = self.listing.matching(self.records()).len();
        format!(" {} | {} ({}) ", T::HEADING, label, total)
      }
    }
  }

  fn render_content(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(self.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if self.query.is_loading() {
      let paragraph = Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, inner);
      return;
    }

    if let Some(error) = self.query.error() {
      let paragraph = Paragraph::new(format!(
        "{}\n\nError: {}\n\nPress 'r' to retry.",
        FAILED_MESSAGE, error
      ))
      .style(Style::default().fg(Color::Red))
      .wrap(Wrap { trim: false });
      frame.render_widget(paragraph, inner);
      return;
    }

    let len = self.visible_len();
    ensure_valid_selection(&mut self.list_state, len);

    if len == 0 {
      render_empty(frame, inner, T::EMPTY);
      return;
    }

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(1), Constraint::Length(1)])
      .split(inner);

    match self.listing.presentation() {
      Presentation::List => self.render_list(frame, chunks[0]),
      Presentation::Cards => self.render_cards(frame, chunks[0]),
    }
    self.render_window_hint(frame, chunks[1]);
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    // Collect items first to avoid borrow conflicts with list_state
    let items: Vec<ListItem> = self
      .listing
      .visible(self.records())
      .into_iter()
      .map(|record| ListItem::new(record.list_line()))
      .collect();

    let list = List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_cards(&self, frame: &mut Frame, area: Rect) {
    let visible = self.listing.visible(self.records());
    let selected = self.list_state.selected().unwrap_or(0);

    let columns = match area.width {
      w if w >= 120 => 3,
      w if w >= 80 => 2,
      _ => 1,
    };
    let fitting_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    // Scroll so the selected card's row stays on screen
    let first_row = (selected / columns).saturating_sub(fitting_rows - 1);

    let rows = Layout::default()
      .direction(Direction::Vertical)
      .constraints(vec![Constraint::Length(CARD_HEIGHT); fitting_rows])
      .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
      let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(*row_area);

      for (col_idx, cell) in cells.iter().enumerate() {
        let idx = (first_row + row_idx) * columns + col_idx;
        let Some(record) = visible.get(idx) else {
          return;
        };

        let border = if idx == selected {
          Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        let card = Paragraph::new(record.card_lines())
          .block(
            Block::default()
              .title(format!(" {} ", record.card_title()))
              .borders(Borders::ALL)
              .border_style(border),
          )
          .wrap(Wrap { trim: true });
        frame.render_widget(card, *cell);
      }
    }
  }

  fn render_window_hint(&self, frame: &mut Frame, area: Rect) {
    let total = self.listing.matching(self.records()).len();
    let shown = self.listing.window().visible(total);

    let mut spans = vec![Span::styled(
      format!(" Showing {} of {}", shown, total),
      Style::default().fg(Color::DarkGray),
    )];
    if self.listing.window().has_more(total) {
      spans.push(Span::styled(
        "  <m> view more  <a> view all",
        Style::default().fg(Color::Cyan),
      ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  // Key handling helpers for or_else chain pattern
  fn handle_categories(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match category_bar::handle_key(&mut self.listing, key) {
      KeyResult::Event(_) => {
        self.list_state.select(Some(0));
        Some(ViewAction::None)
      }
      KeyResult::Handled => Some(ViewAction::None),
      KeyResult::NotHandled => None,
    }
  }

  fn handle_navigation(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.list_state.select_next();
        Some(ViewAction::None)
      }
      KeyCode::Char('k') | KeyCode::Up => {
        self.list_state.select_previous();
        Some(ViewAction::None)
      }
      _ => None,
    }
  }

  fn handle_actions(&mut self, key: KeyEvent) -> Option<ViewAction> {
    match key.code {
      KeyCode::Char('v') => {
        self.listing.toggle_presentation();
        Some(ViewAction::None)
      }
      KeyCode::Char('m') => {
        let total = self.listing.matching(self.records()).len();
        self.listing.window_mut().expand(total);
        Some(ViewAction::None)
      }
      KeyCode::Char('a') => {
        let total = self.listing.matching(self.records()).len();
        self.listing.window_mut().show_all(total);
        Some(ViewAction::None)
      }
      KeyCode::Char('r') if self.query.is_error() => {
        self.query.refetch();
        Some(ViewAction::None)
      }
      KeyCode::Enter => self
        .selected_id()
        .map(|id| ViewAction::Push(T::open(&self.cache, id))),
      KeyCode::Char('q') | KeyCode::Esc => Some(ViewAction::Pop),
      _ => None,
    }
  }
}

fn render_empty(frame: &mut Frame, area: Rect, empty: EmptyState) {
  let lines = vec![
    Line::raw(""),
    Line::styled(empty.title, Style::default().fg(Color::White).bold()),
    Line::styled(empty.hint, Style::default().fg(Color::DarkGray)),
  ];
  frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

impl<T: ListingEntry> View for ListingView<T> {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    self
      .handle_categories(key)
      .or_else(|| self.handle_navigation(key))
      .or_else(|| self.handle_actions(key))
      .unwrap_or(ViewAction::None)
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(1), Constraint::Min(1)])
      .split(area);

    category_bar::render(&self.listing, frame, chunks[0]);
    self.render_content(frame, chunks[1]);
  }

  fn breadcrumb_label(&self) -> String {
    T::HEADING.to_string()
  }

  fn tick(&mut self) {
    if !self.query.poll() {
      return;
    }
    if let Some(Some(records)) = self.query.data() {
      self.listing.set_categories(T::categories(records));
    }
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command").with_priority(10),
      Shortcut::new("←/→", "category").with_priority(20),
      Shortcut::new("enter", "open").with_priority(25),
      Shortcut::new("v", self.listing.presentation().toggled().label()).with_priority(40),
      Shortcut::new("q", "back").with_priority(30),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{AppRecord, CatalogStore};
  use crate::source::StoreSource;
  use crossterm::event::KeyModifiers;
  use std::sync::Arc;
  use std::time::Duration;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  async fn loaded_apps(page_size: usize) -> ListingView<AppRecord> {
    let store = CatalogStore::seeded().unwrap();
    let cache = QueryCache::new(Arc::new(StoreSource::new(store)));
    let mut view = ListingView::<AppRecord>::new(cache, page_size);
    for _ in 0..50 {
      view.tick();
      if !view.query.is_loading() {
        break;
      }
      tokio::time::sleep(Duration::from_millis(5)).await;
    }
    view
  }

  #[tokio::test]
  async fn test_loads_into_window() {
    let view = loaded_apps(2).await;
    assert!(matches!(view.query.state(), QueryState::Success(Some(_))));
    assert_eq!(view.visible_len(), 2);
  }

  #[tokio::test]
  async fn test_view_more_and_view_all() {
    let mut view = loaded_apps(1).await;
    let total = view.records().len();
    assert!(total > 2);

    view.handle_key(key(KeyCode::Char('m')));
    assert_eq!(view.visible_len(), 2);

    view.handle_key(key(KeyCode::Char('a')));
    assert_eq!(view.visible_len(), total);
  }

  #[tokio::test]
  async fn test_category_change_collapses_window() {
    let mut view = loaded_apps(1).await;
    view.handle_key(key(KeyCode::Char('a')));

    view.handle_key(key(KeyCode::Right));
    assert_eq!(view.listing.filter(), "productivity");
    assert!(view.visible_len() <= 1);
    assert_eq!(view.list_state.selected(), Some(0));
  }

  #[tokio::test]
  async fn test_enter_opens_selected_record() {
    let mut view = loaded_apps(6).await;
    view.list_state.select(Some(0));

    match view.handle_key(key(KeyCode::Enter)) {
      ViewAction::Push(detail) => assert_eq!(detail.breadcrumb_label(), "App #1"),
      _ => panic!("expected a detail view"),
    }
  }

  #[tokio::test]
  async fn test_toggle_presentation() {
    let mut view = loaded_apps(6).await;
    assert_eq!(view.listing.presentation(), Presentation::Cards);
    view.handle_key(key(KeyCode::Char('v')));
    assert_eq!(view.listing.presentation(), Presentation::List);
  }

  #[tokio::test]
  async fn test_quit_pops() {
    let mut view = loaded_apps(6).await;
    assert!(matches!(view.handle_key(key(KeyCode::Char('q'))), ViewAction::Pop));
  }
}
