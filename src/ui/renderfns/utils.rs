use crate::catalog::Condition;
use ratatui::prelude::Color;

/// Truncate a string to at most `max_len` characters, adding "..." if
/// truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Insert `,` between groups of three digits.
fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// Format a listing price as `$20,000`; cents only when present.
pub fn format_price(price: Option<f64>) -> String {
  let Some(price) = price.filter(|p| p.is_finite()) else {
    return "Price on request".to_string();
  };

  let sign = if price < 0.0 { "-" } else { "" };
  let cents = (price.abs() * 100.0).round() as u64;
  let (whole, frac) = (cents / 100, cents % 100);

  if frac == 0 {
    format!("{}${}", sign, group_thousands(whole))
  } else {
    format!("{}${}.{:02}", sign, group_thousands(whole), frac)
  }
}

pub fn format_mileage(mileage: Option<u64>) -> String {
  match mileage {
    Some(m) => group_thousands(m),
    None => "-".to_string(),
  }
}

pub fn condition_color(condition: Condition) -> Color {
  match condition {
    Condition::New => Color::Green,
    Condition::Used => Color::Yellow,
    Condition::Other => Color::White,
  }
}

pub fn availability_color(availability: &str) -> Color {
  match availability.to_lowercase().as_str() {
    "available" => Color::Green,
    "sold" => Color::Red,
    _ => Color::White,
  }
}
