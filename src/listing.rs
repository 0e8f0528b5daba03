//! Listing logic shared by the app store and portfolio views.
//!
//! Everything here is a pure view over an already fetched collection:
//! changing the category or the window never issues a request.

use std::collections::BTreeMap;

use crate::catalog::CatalogEntry;

/// Filter value that matches every record.
pub const ALL: &str = "all";

/// A selectable category tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
  /// Matched as a case-insensitive substring of the record's category
  pub value: String,
  pub label: String,
}

impl Category {
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      label: label.into(),
    }
  }
}

/// Fixed category tabs of the app store.
pub fn app_categories() -> Vec<Category> {
  vec![
    Category::new(ALL, "All Apps"),
    Category::new("productivity", "Productivity"),
    Category::new("lifestyle", "Lifestyle"),
    Category::new("health", "Health & Fitness"),
    Category::new("entertainment", "Entertainment"),
  ]
}

/// Category tabs derived from the records themselves: `all` first, then
/// every distinct category, lowercased and sorted.
pub fn derived_categories<T: CatalogEntry>(records: &[T], all_label: &str) -> Vec<Category> {
  // Label with the first spelling seen
  let mut unique: BTreeMap<String, String> = BTreeMap::new();
  for record in records {
    let category = record.category().trim();
    if category.is_empty() {
      continue;
    }
    unique
      .entry(category.to_lowercase())
      .or_insert_with(|| category.to_string());
  }

  std::iter::once(Category::new(ALL, all_label))
    .chain(unique.into_iter().map(|(value, label)| Category::new(value, label)))
    .collect()
}

/// Records whose category contains `filter`, ignoring case, in their original order.
pub fn filter_by_category<'a, T: CatalogEntry>(records: &'a [T], filter: &str) -> Vec<&'a T> {
  if filter == ALL {
    return records.iter().collect();
  }
  let needle = filter.to_lowercase();
  records
    .iter()
    .filter(|record| record.category().to_lowercase().contains(&needle))
    .collect()
}

/// Copy shown in place of an empty listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
  pub title: &'static str,
  pub hint: &'static str,
}

pub const EMPTY_APPS: EmptyState = EmptyState {
  title: "No apps found in this category",
  hint: "Try selecting a different category",
};

pub const EMPTY_PORTFOLIO: EmptyState = EmptyState {
  title: "No projects found in this category",
  hint: "Try selecting a different category",
};

/// How listing entries are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presentation {
  #[default]
  Cards,
  List,
}

impl Presentation {
  pub fn toggled(self) -> Self {
    match self {
      Presentation::Cards => Presentation::List,
      Presentation::List => Presentation::Cards,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Presentation::Cards => "cards",
      Presentation::List => "list",
    }
  }
}

/// Number of entries currently revealed, growing a page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingWindow {
  page_size: usize,
  shown: usize,
}

impl ListingWindow {
  pub fn new(page_size: usize) -> Self {
    let page_size = page_size.max(1);
    Self {
      page_size,
      shown: page_size,
    }
  }

  /// How many of `total` entries are visible.
  pub fn visible(&self, total: usize) -> usize {
    self.shown.min(total)
  }

  pub fn has_more(&self, total: usize) -> bool {
    total > self.shown
  }

  /// Reveal one more page. Returns false when everything is already shown.
  pub fn expand(&mut self, total: usize) -> bool {
    if !self.has_more(total) {
      return false;
    }
    self.shown += self.page_size;
    true
  }

  /// Reveal every entry.
  pub fn show_all(&mut self, total: usize) {
    self.shown = self.shown.max(total);
  }

  pub fn collapse(&mut self) {
    self.shown = self.page_size;
  }
}

/// Listing state: selected category, revealed window and layout.
#[derive(Debug, Clone)]
pub struct Listing {
  categories: Vec<Category>,
  selected: usize,
  window: ListingWindow,
  presentation: Presentation,
}

impl Listing {
  pub fn new(categories: Vec<Category>, page_size: usize) -> Self {
    Self {
      categories,
      selected: 0,
      window: ListingWindow::new(page_size),
      presentation: Presentation::default(),
    }
  }

  pub fn categories(&self) -> &[Category] {
    &self.categories
  }

  /// Replace the tabs, keeping the current filter if it is still offered.
  pub fn set_categories(&mut self, categories: Vec<Category>) {
    let current = self.filter().to_string();
    self.categories = categories;
    self.selected = self
      .categories
      .iter()
      .position(|c| c.value == current)
      .unwrap_or(0);
  }

  pub fn selected_index(&self) -> usize {
    self.selected
  }

  /// Active filter value, `all` when nothing else is selected.
  pub fn filter(&self) -> &str {
    self
      .categories
      .get(self.selected)
      .map(|c| c.value.as_str())
      .unwrap_or(ALL)
  }

  /// Select a category by value. Collapses the window when the filter changes.
  pub fn select(&mut self, value: &str) -> bool {
    match self.categories.iter().position(|c| c.value == value) {
      Some(idx) => {
        self.select_index(idx);
        true
      }
      None => false,
    }
  }

  /// Step through the tabs with wrapping.
  pub fn cycle(&mut self, forward: bool) {
    let total = self.categories.len();
    if total == 0 {
      return;
    }
    let idx = if forward {
      (self.selected + 1) % total
    } else if self.selected == 0 {
      total - 1
    } else {
      self.selected - 1
    };
    self.select_index(idx);
  }

  fn select_index(&mut self, idx: usize) {
    if idx != self.selected {
      self.selected = idx;
      self.window.collapse();
    }
  }

  pub fn window(&self) -> &ListingWindow {
    &self.window
  }

  pub fn window_mut(&mut self) -> &mut ListingWindow {
    &mut self.window
  }

  pub fn presentation(&self) -> Presentation {
    self.presentation
  }

  pub fn toggle_presentation(&mut self) {
    self.presentation = self.presentation.toggled();
  }

  /// Records matching the current filter.
  pub fn matching<'a, T: CatalogEntry>(&self, records: &'a [T]) -> Vec<&'a T> {
    filter_by_category(records, self.filter())
  }

  /// Records matching the current filter, cut to the revealed window.
  pub fn visible<'a, T: CatalogEntry>(&self, records: &'a [T]) -> Vec<&'a T> {
    let mut matching = self.matching(records);
    matching.truncate(self.window.visible(matching.len()));
    matching
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{AppRecord, CatalogStore, PortfolioItemRecord};
  use crate::source::testing::two_app_store;

  fn ids<T: CatalogEntry>(records: &[&T]) -> Vec<u32> {
    records.iter().map(|r| r.id()).collect()
  }

  fn reversed_apps() -> Vec<AppRecord> {
    let mut apps = two_app_store().apps().to_vec();
    apps.reverse();
    apps
  }

  #[test]
  fn test_health_matches_health_and_fitness() {
    let apps = reversed_apps();
    assert_eq!(ids(&filter_by_category(&apps, "health")), vec![2]);
  }

  #[test]
  fn test_all_keeps_everything_in_order() {
    let apps = reversed_apps();
    assert_eq!(ids(&filter_by_category(&apps, ALL)), vec![2, 1]);
  }

  #[test]
  fn test_match_ignores_case() {
    let apps = reversed_apps();
    assert_eq!(ids(&filter_by_category(&apps, "PRODUCTIVITY")), vec![1]);
    assert_eq!(ids(&filter_by_category(&apps, "fitness")), vec![2]);
  }

  #[test]
  fn test_no_match_is_empty() {
    let apps = reversed_apps();
    assert!(filter_by_category(&apps, "entertainment").is_empty());
  }

  #[test]
  fn test_seeded_categories_each_match_something() {
    let store = CatalogStore::seeded().unwrap();
    for category in app_categories() {
      assert!(
        !filter_by_category(store.apps(), &category.value).is_empty(),
        "{} matched nothing",
        category.value
      );
    }
  }

  #[test]
  fn test_derived_categories_unique_sorted() {
    let items = vec![
      PortfolioItemRecord {
        id: 1,
        category: "Web Design".to_string(),
        ..Default::default()
      },
      PortfolioItemRecord {
        id: 2,
        category: "Branding".to_string(),
        ..Default::default()
      },
      PortfolioItemRecord {
        id: 3,
        category: "web design".to_string(),
        ..Default::default()
      },
    ];

    let categories = derived_categories(&items, "All Projects");
    let values: Vec<&str> = categories.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec![ALL, "branding", "web design"]);
    assert_eq!(categories[2].label, "Web Design");
  }

  #[test]
  fn test_window_expands_by_page() {
    let mut window = ListingWindow::new(2);
    assert_eq!(window.visible(5), 2);
    assert!(window.has_more(5));

    assert!(window.expand(5));
    assert_eq!(window.visible(5), 4);
    assert!(window.expand(5));
    assert_eq!(window.visible(5), 5);
    assert!(!window.has_more(5));
    assert!(!window.expand(5));
  }

  #[test]
  fn test_changing_filter_collapses_window() {
    let store = CatalogStore::seeded().unwrap();
    let mut listing = Listing::new(app_categories(), 2);

    listing.window_mut().show_all(store.apps().len());
    assert_eq!(listing.visible(store.apps()).len(), store.apps().len());

    assert!(listing.select("lifestyle"));
    assert_eq!(listing.filter(), "lifestyle");
    assert_eq!(*listing.window(), ListingWindow::new(2));

    // Reselecting the same tab keeps the window
    listing.window_mut().show_all(10);
    listing.select("lifestyle");
    assert_eq!(listing.window().visible(10), 10);
  }

  #[test]
  fn test_cycle_wraps() {
    let mut listing = Listing::new(app_categories(), 6);
    listing.cycle(false);
    assert_eq!(listing.filter(), "entertainment");
    listing.cycle(true);
    assert_eq!(listing.filter(), ALL);
  }

  #[test]
  fn test_set_categories_keeps_known_filter() {
    let mut listing = Listing::new(vec![Category::new(ALL, "All")], 6);
    listing.set_categories(vec![
      Category::new(ALL, "All"),
      Category::new("branding", "Branding"),
    ]);
    listing.select("branding");

    listing.set_categories(vec![
      Category::new(ALL, "All"),
      Category::new("apps", "Apps"),
      Category::new("branding", "Branding"),
    ]);
    assert_eq!(listing.filter(), "branding");

    listing.set_categories(vec![Category::new(ALL, "All")]);
    assert_eq!(listing.filter(), ALL);
  }

  #[test]
  fn test_toggle_presentation() {
    let mut listing = Listing::new(app_categories(), 6);
    assert_eq!(listing.presentation(), Presentation::Cards);
    listing.toggle_presentation();
    assert_eq!(listing.presentation(), Presentation::List);
  }
}
