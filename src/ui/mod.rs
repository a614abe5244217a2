pub mod components;
pub mod context;
pub mod renderfns;
pub mod view;
pub mod views;

use crate::app::App;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

/// Main draw function: header, current view, footer, then overlays
pub fn draw(frame: &mut Frame, app: &mut App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Current view
      Constraint::Length(1), // Breadcrumb
    ])
    .split(frame.area());

  let shortcuts = app.current_view().map(|v| v.shortcuts()).unwrap_or_default();
  renderfns::draw_header(
    frame,
    chunks[0],
    &app.api_host(),
    app.cached_entries(),
    &shortcuts,
  );

  let breadcrumb = app.breadcrumb();
  if let Some(view) = app.current_view_mut() {
    view.render(frame, chunks[1]);
  }
  renderfns::draw_footer(frame, chunks[2], &breadcrumb);

  app.render_overlays(frame, chunks[1]);
}

/// Keep a list selection inside `len` items.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    Some(idx) if idx < len => {}
    Some(_) => state.select(Some(len - 1)),
    None => state.select(Some(0)),
  }
}
