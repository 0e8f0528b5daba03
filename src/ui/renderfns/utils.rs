use ratatui::prelude::Color;

use crate::catalog::Pricing;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Display color for an app's price tag
pub fn price_color(pricing: &Pricing) -> Color {
  match pricing {
    Pricing::Free => Color::Green,
    Pricing::Paid(_) => Color::Yellow,
  }
}

/// Five-star rating bar, rounded to the nearest whole star
pub fn stars(rating: f32) -> String {
  let filled = rating.clamp(0.0, 5.0).round() as usize;
  format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("Health & Fitness ★★★", 10), "Health ...");
  }

  #[test]
  fn test_price_color() {
    assert_eq!(price_color(&Pricing::Free), Color::Green);
    assert_eq!(price_color(&Pricing::paid("4.99").unwrap()), Color::Yellow);
  }

  #[test]
  fn test_stars() {
    assert_eq!(stars(4.8), "★★★★★");
    assert_eq!(stars(4.2), "★★★★☆");
    assert_eq!(stars(0.0), "☆☆☆☆☆");
  }
}
