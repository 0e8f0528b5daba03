use crate::cache::QueryCache;
use crate::catalog::PortfolioItemRecord;
use crate::detail::{record_query, DetailState};
use crate::listing::{derived_categories, Category, EmptyState, EMPTY_PORTFOLIO};
use crate::query::Query;
use crate::ui::renderfns::{draw_unresolved, truncate, NotFound};
use crate::ui::view::{View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::listing::ListingEntry;

const PROJECT_NOT_FOUND: NotFound = NotFound {
  title: "Project Not Found",
  hint: "The project you're looking for doesn't exist or has been removed.",
  back_to: "the portfolio",
};

fn technologies(item: &PortfolioItemRecord) -> String {
  item.technologies.join(", ")
}

impl ListingEntry for PortfolioItemRecord {
  const HEADING: &'static str = "Portfolio";
  const EMPTY: EmptyState = EMPTY_PORTFOLIO;

  fn categories(records: &[Self]) -> Vec<Category> {
    derived_categories(records, "All Projects")
  }

  fn list_line(&self) -> Line<'static> {
    Line::from(vec![
      Span::raw(format!("{:<32}", truncate(&self.title, 32))),
      Span::raw(" "),
      Span::styled(
        format!("{:<18}", truncate(&self.category, 18)),
        Style::default().fg(Color::DarkGray),
      ),
      Span::raw(" "),
      Span::styled(technologies(self), Style::default().fg(Color::Magenta)),
    ])
  }

  fn card_title(&self) -> String {
    self.title.clone()
  }

  fn card_lines(&self) -> Vec<Line<'static>> {
    vec![
      Line::styled(self.category.clone(), Style::default().fg(Color::DarkGray)),
      Line::styled(technologies(self), Style::default().fg(Color::Magenta)),
      Line::raw(self.description.clone()),
    ]
  }

  fn open(cache: &QueryCache, id: u32) -> Box<dyn View> {
    Box::new(PortfolioDetailView::new(cache, id))
  }
}

/// Detail page of a single portfolio project
pub struct PortfolioDetailView {
  id: u32,
  query: Query<Option<PortfolioItemRecord>>,
}

impl PortfolioDetailView {
  pub fn new(cache: &QueryCache, id: u32) -> Self {
    Self {
      id,
      query: record_query(cache, id),
    }
  }

  fn state(&self) -> DetailState<PortfolioItemRecord> {
    DetailState::from_query(self.query.state())
  }

  fn render_item(&self, frame: &mut Frame, area: Rect, item: &PortfolioItemRecord) {
    let label =
      |text: &str| Span::styled(format!("{:<14}", text), Style::default().fg(Color::DarkGray));

    let lines = vec![
      Line::styled(item.title.clone(), Style::default().fg(Color::White).bold()),
      Line::styled(item.category.clone(), Style::default().fg(Color::DarkGray)),
      Line::raw(""),
      Line::raw(item.description.clone()),
      Line::raw(""),
      Line::from(vec![
        label("Technologies"),
        Span::styled(technologies(item), Style::default().fg(Color::Magenta)),
      ]),
      Line::from(vec![
        label("Project"),
        Span::styled(item.project_url.clone(), Style::default().fg(Color::Blue)),
      ]),
      Line::from(vec![label("Image"), Span::raw(item.image_url.clone())]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
  }
}

impl View for PortfolioDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('r') if matches!(self.state(), DetailState::Failed(_)) => {
        self.query.refetch();
        ViewAction::None
      }
      KeyCode::Char('q') | KeyCode::Esc => ViewAction::Pop,
      _ => ViewAction::None,
    }
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(format!(" {} ", self.breadcrumb_label()))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = self.state();
    if draw_unresolved(frame, inner, &state, &PROJECT_NOT_FOUND) {
      return;
    }
    if let DetailState::Resolved(item) = &state {
      self.render_item(frame, inner, item);
    }
  }

  fn breadcrumb_label(&self) -> String {
    match self.query.data() {
      Some(Some(item)) => item.title.clone(),
      _ => format!("Project #{}", self.id),
    }
  }

  fn tick(&mut self) {
    self.query.poll();
  }
}
