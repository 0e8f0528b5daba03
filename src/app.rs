use crate::cache::QueryCache;
use crate::catalog::{AppRecord, PortfolioItemRecord};
use crate::config::Config;
use crate::event::{Event, EventHandler};
use crate::source::CatalogSource;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult};
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{AppDetailView, ListingView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application state
pub struct App {
  /// Navigation stack - root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  /// Command overlay (after pressing :)
  command_input: CommandInput,

  /// Shared by every view of the session
  cache: QueryCache,

  config: Config,

  source_label: String,

  /// One-off message for the footer, cleared on the next key
  status: Option<String>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  /// Start on the app store listing, optionally with one app's detail page open on top.
  pub fn new(config: Config, source: Arc<dyn CatalogSource>, open_app: Option<u32>) -> Self {
    let cache = QueryCache::with_unauthorized(source, config.source.on_unauthorized);
    let source_label = cache.describe_source();

    let mut view_stack: Vec<Box<dyn View>> = vec![Box::new(ListingView::<AppRecord>::new(
      cache.clone(),
      config.listing.page_size,
    ))];
    if let Some(id) = open_app {
      view_stack.push(Box::new(AppDetailView::new(&cache, id)));
    }

    Self {
      view_stack,
      command_input: CommandInput::new(),
      cache,
      config,
      source_label,
      status: None,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(250));
    let result = self.event_loop(&mut terminal, &mut events).await;

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!(fetches = self.cache.fetch_count(), "browse session ended");
    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(Event::Key(key)) => self.handle_key(key),
        Some(Event::Tick) => self.tick(),
        // The next iteration redraws at the new size
        Some(Event::Resize) => {}
        None => break,
      }
    }
    Ok(())
  }

  fn tick(&mut self) {
    if let Some(view) = self.view_stack.last_mut() {
      view.tick();
    }
  }

  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    match self.command_input.handle_key(key) {
      KeyResult::Event(CommandEvent::Submitted(cmd)) => {
        self.execute_command(&cmd);
        return;
      }
      KeyResult::Handled | KeyResult::Event(CommandEvent::Cancelled) => return,
      KeyResult::NotHandled if self.command_input.is_active() => return,
      KeyResult::NotHandled => {}
    }

    self.status = None;
    let action = match self.view_stack.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::Pop,
    };
    self.apply(action);
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => {
        debug!(view = %view.breadcrumb_label(), "push view");
        self.view_stack.push(view);
      }
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
    }
  }

  fn execute_command(&mut self, cmd: &str) {
    match cmd {
      "apps" => self.reset_root(Box::new(ListingView::<AppRecord>::new(
        self.cache.clone(),
        self.config.listing.page_size,
      ))),
      "portfolio" => self.reset_root(Box::new(ListingView::<PortfolioItemRecord>::new(
        self.cache.clone(),
        self.config.listing.page_size,
      ))),
      "quit" => self.should_quit = true,
      "" => {}
      other => {
        warn!(command = other, "unknown command");
        self.status = Some(format!("Unknown command: {}", other));
      }
    }
  }

  /// Replace the whole stack with a new root view
  fn reset_root(&mut self, view: Box<dyn View>) {
    self.view_stack.clear();
    self.view_stack.push(view);
  }

  pub fn title(&self) -> &str {
    &self.config.title
  }

  pub fn source_label(&self) -> &str {
    &self.source_label
  }

  pub fn status(&self) -> Option<&str> {
    self.status.as_deref()
  }

  pub fn command_input(&self) -> &CommandInput {
    &self.command_input
  }

  pub fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|view| view.as_ref())
  }

  pub fn current_view_mut(&mut self) -> Option<&mut Box<dyn View>> {
    self.view_stack.last_mut()
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|view| view.breadcrumb_label())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::CatalogStore;
  use crate::source::StoreSource;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn new_app(open_app: Option<u32>) -> App {
    let source = Arc::new(StoreSource::new(CatalogStore::seeded().unwrap()));
    App::new(Config::default(), source, open_app)
  }

  fn type_command(app: &mut App, text: &str) {
    app.handle_key(key(KeyCode::Char(':')));
    for c in text.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
  }

  #[tokio::test]
  async fn test_starts_on_app_store() {
    let app = new_app(None);
    assert_eq!(app.breadcrumb(), vec!["App Store".to_string()]);
  }

  #[tokio::test]
  async fn test_open_app_pushes_detail() {
    let mut app = new_app(Some(3));
    assert_eq!(app.breadcrumb(), vec!["App Store".to_string(), "App #3".to_string()]);

    app.handle_key(key(KeyCode::Char('q')));
    assert_eq!(app.breadcrumb().len(), 1);
    assert!(!app.should_quit);
  }

  #[tokio::test]
  async fn test_portfolio_command_replaces_root() {
    let mut app = new_app(Some(1));
    type_command(&mut app, "portfolio");
    assert_eq!(app.breadcrumb(), vec!["Portfolio".to_string()]);

    type_command(&mut app, "a");
    assert_eq!(app.breadcrumb(), vec!["App Store".to_string()]);
  }

  #[tokio::test]
  async fn test_quit_keys() {
    let mut app = new_app(None);
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit);

    let mut app = new_app(None);
    type_command(&mut app, "quit");
    assert!(app.should_quit);

    let mut app = new_app(None);
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
  }

  #[tokio::test]
  async fn test_keys_in_prompt_do_not_reach_view() {
    let mut app = new_app(None);
    app.handle_key(key(KeyCode::Char(':')));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit);
    assert!(app.command_input().is_active());
  }
}
