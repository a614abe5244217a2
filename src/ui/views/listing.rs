//! Pieces shared by the views that show a list of cars.

use crate::catalog::{ListingFilter, Vehicle};
use crate::query::QueryState;
use crate::ui::renderfns::{condition_color, format_price, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};

pub const LOADING_MESSAGE: &str = "Please wait...";

/// What a listing view shows for its query state.
#[derive(Debug, PartialEq)]
pub enum ListingContent<'a> {
  Loading,
  /// Request failed; the view shows a friendly retry notice
  Failed,
  /// Nothing to show: the API answered not-found or the filter left
  /// nothing over
  Empty,
  Cars(Vec<&'a Vehicle>),
}

/// Map a query state through the view's display predicate.
pub fn listing_content<'a>(
  state: &'a QueryState<Vec<Vehicle>>,
  filter: &ListingFilter,
) -> ListingContent<'a> {
  match state {
    QueryState::Idle | QueryState::Loading => ListingContent::Loading,
    QueryState::Error(_) => ListingContent::Failed,
    QueryState::NotFound => ListingContent::Empty,
    QueryState::Success(cars) => {
      let shown = filter.apply(cars);
      if shown.is_empty() {
        ListingContent::Empty
      } else {
        ListingContent::Cars(shown)
      }
    }
  }
}

/// Friendly notice for a failed load of `what` ("the New Cars").
pub fn error_message(what: &str) -> String {
  format!(
    "Oops! Something went wrong while loading {}. Don't worry, please try again in a moment.",
    what
  )
}

/// One list row: name, brand and year, condition, price.
pub fn car_row(vehicle: &Vehicle) -> ListItem<'static> {
  let year = vehicle
    .year
    .map(|y| y.to_string())
    .unwrap_or_else(|| "----".to_string());

  let mut spans = vec![
    Span::styled(
      format!("{:<32}", truncate(&vehicle.name, 32)),
      Style::default().fg(Color::White).bold(),
    ),
    Span::raw(" "),
    Span::styled(
      format!("{:<12}", truncate(&vehicle.brand, 12)),
      Style::default().fg(Color::Cyan),
    ),
    Span::styled(format!("{:<6}", year), Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!("{:<6}", vehicle.condition.label()),
      Style::default().fg(condition_color(vehicle.condition)),
    ),
    Span::styled(
      format!("{:>16}", format_price(vehicle.price)),
      Style::default().fg(Color::Yellow),
    ),
  ];
  if vehicle.images.is_empty() {
    spans.push(Span::styled("  No photos", Style::default().fg(Color::DarkGray)));
  }

  ListItem::new(Line::from(spans))
}

/// Render a selectable list of cars inside `block`.
pub fn render_cars(
  frame: &mut Frame,
  area: Rect,
  block: Block,
  cars: &[&Vehicle],
  list_state: &mut ListState,
) {
  let items: Vec<ListItem> = cars.iter().map(|v| car_row(v)).collect();
  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  frame.render_stateful_widget(list, area, list_state);
}

/// Render a centered notice (loading, error, empty) inside `block`.
pub fn render_notice(frame: &mut Frame, area: Rect, block: Block, lines: Vec<Line>, color: Color) {
  let paragraph = Paragraph::new(lines)
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .style(Style::default().fg(color));
  frame.render_widget(paragraph, area);
}
