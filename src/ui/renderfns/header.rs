use crate::ui::view::ShortcutInfo;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar: brand, API host, cached entry count, shortcuts
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  api_host: &str,
  cached_entries: usize,
  shortcuts: &[ShortcutInfo],
) {
  let mut spans = vec![
    Span::styled(" ebucars ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", api_host), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} cached ", cached_entries),
      Style::default().fg(Color::Yellow),
    ),
    Span::raw(" "),
  ];

  let mut shortcuts = shortcuts.to_vec();
  shortcuts.sort_by_key(|s| s.priority);
  for shortcut in shortcuts {
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

#[cfg(test)]
mod tests {
  use super::*;
  use ratatui::backend::TestBackend;

  #[test]
  fn test_header_lists_shortcuts_by_priority() {
    let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
    let shortcuts = [
      ShortcutInfo::new("q", "back").with_priority(30),
      ShortcutInfo::new(":", "command").with_priority(10),
    ];
    terminal
      .draw(|f| draw_header(f, f.area(), "cars.example.com", 2, &shortcuts))
      .unwrap();

    let line: String = terminal
      .backend()
      .buffer()
      .content
      .iter()
      .map(|c| c.symbol())
      .collect();
    assert!(line.contains("ebucars"));
    assert!(line.contains("cars.example.com"));
    assert!(line.contains("2 cached"));
    let command = line.find("<:> command").unwrap();
    let back = line.find("<q> back").unwrap();
    assert!(command < back);
  }
}
