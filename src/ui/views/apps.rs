use crate::cache::QueryCache;
use crate::catalog::AppRecord;
use crate::detail::{
  detail_rows, features, record_query, screenshots, AppTab, DetailState, NOT_FOUND_HINT,
  NOT_FOUND_TITLE,
};
use crate::listing::{app_categories, Category, EmptyState, EMPTY_APPS};
use crate::query::Query;
use crate::ui::renderfns::{draw_unresolved, price_color, stars, truncate, NotFound};
use crate::ui::view::{Shortcut, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

use super::listing::ListingEntry;

const APP_NOT_FOUND: NotFound = NotFound {
  title: NOT_FOUND_TITLE,
  hint: NOT_FOUND_HINT,
  back_to: "the App Store",
};

impl ListingEntry for AppRecord {
  const HEADING: &'static str = "App Store";
  const EMPTY: EmptyState = EMPTY_APPS;

  fn categories(_records: &[Self]) -> Vec<Category> {
    app_categories()
  }

  fn list_line(&self) -> Line<'static> {
    Line::from(vec![
      Span::raw(format!("{:<24}", truncate(&self.name, 24))),
      Span::raw(" "),
      Span::styled(
        format!("{:<18}", truncate(&self.category, 18)),
        Style::default().fg(Color::DarkGray),
      ),
      Span::raw(" "),
      Span::styled(stars(self.rating), Style::default().fg(Color::Yellow)),
      Span::raw(" "),
      Span::styled(
        self.pricing.label().to_string(),
        Style::default().fg(price_color(&self.pricing)),
      ),
    ])
  }

  fn card_title(&self) -> String {
    self.name.clone()
  }

  fn card_lines(&self) -> Vec<Line<'static>> {
    vec![
      Line::from(vec![
        Span::styled(self.category.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
          self.pricing.label().to_string(),
          Style::default().fg(price_color(&self.pricing)),
        ),
      ]),
      Line::from(vec![
        Span::styled(stars(self.rating), Style::default().fg(Color::Yellow)),
        Span::styled(
          format!(" {:.1} ({})", self.rating, self.reviews),
          Style::default().fg(Color::DarkGray),
        ),
      ]),
      Line::raw(self.description.clone()),
    ]
  }

  fn open(cache: &QueryCache, id: u32) -> Box<dyn View> {
    Box::new(AppDetailView::new(cache, id))
  }
}

/// Detail page of a single app
pub struct AppDetailView {
  id: u32,
  query: Query<Option<AppRecord>>,
  tab: AppTab,
}

impl AppDetailView {
  pub fn new(cache: &QueryCache, id: u32) -> Self {
    Self {
      id,
      query: record_query(cache, id),
      tab: AppTab::default(),
    }
  }

  fn state(&self) -> DetailState<AppRecord> {
    DetailState::from_query(self.query.state())
  }

  fn render_app(&self, frame: &mut Frame, area: Rect, app: &AppRecord) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(4), // Name, rating, price and action
        Constraint::Length(4), // Description
        Constraint::Length(1), // Tabs
        Constraint::Min(1),    // Tab body
      ])
      .split(area);

    let mut meta = vec![
      Span::styled(app.category.clone(), Style::default().fg(Color::DarkGray)),
    ];
    if let Some(version) = &app.version {
      meta.push(Span::styled(
        format!("  v{}", version),
        Style::default().fg(Color::DarkGray),
      ));
    }

    let header = vec![
      Line::styled(app.name.clone(), Style::default().fg(Color::White).bold()),
      Line::from(meta),
      Line::from(vec![
        Span::styled(stars(app.rating), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" {:.1}  ({} reviews)", app.rating, app.reviews)),
      ]),
      Line::from(vec![
        Span::styled(
          app.pricing.label().to_string(),
          Style::default().fg(price_color(&app.pricing)).bold(),
        ),
        Span::raw("  "),
        Span::styled(
          format!(" {} ", app.action_label()),
          Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
      ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let description = Paragraph::new(app.description.clone()).wrap(Wrap { trim: true });
    frame.render_widget(description, chunks[1]);

    let selected = AppTab::ALL
      .iter()
      .position(|tab| *tab == self.tab)
      .unwrap_or(0);
    let tabs = Tabs::new(AppTab::ALL.iter().map(|tab| tab.title()))
      .select(selected)
      .style(Style::default().fg(Color::Gray))
      .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
      .divider("│");
    frame.render_widget(tabs, chunks[2]);

    frame.render_widget(self.tab_body(app), chunks[3]);
  }

  fn tab_body(&self, app: &AppRecord) -> Paragraph<'static> {
    let placeholder =
      |text: &str| Line::styled(text.to_string(), Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = match self.tab {
      AppTab::Features => match features(app) {
        Ok(items) => items
          .iter()
          .map(|feature| {
            Line::from(vec![
              Span::styled("• ", Style::default().fg(Color::Cyan)),
              Span::raw(feature.clone()),
            ])
          })
          .collect(),
        Err(text) => vec![placeholder(text)],
      },
      AppTab::Screenshots => match screenshots(app) {
        Ok(urls) => urls
          .iter()
          .enumerate()
          .map(|(idx, url)| {
            Line::from(vec![
              Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(Color::DarkGray)),
              Span::raw(url.clone()),
            ])
          })
          .collect(),
        Err(text) => vec![placeholder(text)],
      },
      AppTab::Details => {
        let mut rows: Vec<Line> = detail_rows(app)
          .into_iter()
          .map(|(label, value)| {
            Line::from(vec![
              Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
              Span::raw(value),
            ])
          })
          .collect();
        if let Some(website) = &app.website {
          rows.push(Line::from(vec![
            Span::styled(format!("{:<14}", "Website"), Style::default().fg(Color::DarkGray)),
            Span::styled(website.clone(), Style::default().fg(Color::Blue)),
          ]));
        }
        rows
      }
    };

    Paragraph::new(lines)
      .block(Block::default().borders(Borders::TOP))
      .wrap(Wrap { trim: false })
  }
}

impl View for AppDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
        self.tab = self.tab.next();
        ViewAction::None
      }
      KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
        self.tab = self.tab.previous();
        ViewAction::None
      }
      // Absent stays absent; only failures are worth retrying
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
    if draw_unresolved(frame, inner, &state, &APP_NOT_FOUND) {
      return;
    }
    if let DetailState::Resolved(app) = &state {
      self.render_app(frame, inner, app);
    }
  }

  fn breadcrumb_label(&self) -> String {
    match self.query.data() {
      Some(Some(app)) => app.name.clone(),
      _ => format!("App #{}", self.id),
    }
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<Shortcut> {
    vec![
      Shortcut::new(":", "command").with_priority(10),
      Shortcut::new("tab", "section").with_priority(20),
      Shortcut::new("q", "back").with_priority(30),
    ]
  }
}
