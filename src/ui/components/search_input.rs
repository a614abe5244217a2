use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by the search box that the parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
  /// A non-blank term was submitted (already trimmed)
  Submitted(String),
  /// The box was closed without a search
  Cancelled,
}

/// Free-text search box, opened with `/`
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
  input: TextInput,
  active: bool,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  pub fn activate(&mut self) {
    self.active = true;
    self.input.clear();
  }

  fn close(&mut self) {
    self.active = false;
    self.input.clear();
  }

  /// Handle a key event.
  /// Call this regardless of active state; it handles activation too.
  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<SearchEvent> {
    if !self.active {
      if key.code == KeyCode::Char('/') {
        self.activate();
        return KeyResult::Handled;
      }
      return KeyResult::NotHandled;
    }

    match self.input.handle_key(key) {
      InputResult::Submitted(raw) => {
        let term = raw.trim();
        if term.is_empty() {
          // Nothing to search for; keep the box open
          return KeyResult::Handled;
        }
        let term = term.to_string();
        self.close();
        KeyResult::Event(SearchEvent::Submitted(term))
      }
      InputResult::Cancelled => {
        self.close();
        KeyResult::Event(SearchEvent::Cancelled)
      }
      InputResult::Consumed => KeyResult::Handled,
      // Swallow everything else while the box has focus
      InputResult::NotHandled => KeyResult::Handled,
    }
  }

  /// Render the search overlay if active
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    if !self.active {
      return;
    }

    let width = ((area.width as u32 * 60 / 100) as u16).clamp(30, 60).min(area.width);
    let height = 3u16.min(area.height);
    let overlay_area = Rect::new(area.x + 1, area.y + 1, width, height).intersection(area);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Search cars ");

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let (before, after) = split_at_cursor(self.input.value(), self.input.cursor_position());
    let input_line = Line::from(vec![
      Span::styled("/", Style::default().fg(Color::Yellow)),
      Span::raw(before),
      Span::styled("_", Style::default().fg(Color::Yellow)),
      Span::raw(after),
    ]);
    frame.render_widget(Paragraph::new(input_line), inner);
  }
}

/// Split `s` before its `cursor`-th character.
fn split_at_cursor(s: &str, cursor: usize) -> (&str, &str) {
  let at = s.char_indices().nth(cursor).map(|(i, _)| i).unwrap_or(s.len());
  s.split_at(at)
}
