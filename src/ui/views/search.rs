use crate::catalog::Vehicle;
use crate::query::Query;
use crate::ui::context::ViewContext;
use crate::ui::ensure_valid_selection;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::listing::{
  error_message, listing_content, render_cars, render_notice, ListingContent, LOADING_MESSAGE,
};
use crate::ui::views::CarDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, ListState};

/// Server-side search results for one term
pub struct SearchView {
  ctx: ViewContext,
  term: String,
  query: Query<Vec<Vehicle>>,
  list_state: ListState,
}

impl SearchView {
  /// Start a search for `term`. Blank terms have no view.
  pub fn new(ctx: ViewContext, term: &str) -> Option<Self> {
    let query = ctx.search_query(term)?;
    Some(Self {
      ctx,
      term: term.trim().to_string(),
      query,
      list_state: ListState::default(),
    })
  }

  fn shown(&self) -> Vec<&Vehicle> {
    match listing_content(self.query.state(), &self.ctx.listing_filter(None)) {
      ListingContent::Cars(cars) => cars,
      _ => Vec::new(),
    }
  }
}

impl View for SearchView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('r') => self.query.refetch(),
      KeyCode::Enter => {
        let selected = self
          .list_state
          .selected()
          .and_then(|idx| self.shown().get(idx).map(|v| v.id));
        if let Some(id) = selected {
          return ViewAction::Push(Box::new(CarDetailView::new(self.ctx.clone(), id)));
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let content = listing_content(self.query.state(), &self.ctx.listing_filter(None));

    let block = Block::default()
      .title(format!(" Results for: \"{}\" ", self.term))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    match content {
      ListingContent::Loading => render_notice(
        frame,
        area,
        block,
        vec![Line::from(LOADING_MESSAGE)],
        Color::DarkGray,
      ),
      ListingContent::Failed => render_notice(
        frame,
        area,
        block,
        vec![Line::from(error_message("your searched car"))],
        Color::LightRed,
      ),
      ListingContent::Empty => render_notice(
        frame,
        area,
        block,
        vec![
          Line::from(format!("No cars found for \"{}\"", self.term)).bold(),
          Line::from(""),
          Line::from("Try a different brand, model, or keyword").fg(Color::DarkGray),
        ],
        Color::White,
      ),
      ListingContent::Cars(cars) => {
        ensure_valid_selection(&mut self.list_state, cars.len());
        render_cars(frame, area, block, &cars, &mut self.list_state);
      }
    }
  }

  fn breadcrumb_label(&self) -> String {
    format!("Search \"{}\"", self.term)
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn retarget_search(&mut self, term: &str) -> bool {
    if !self.ctx.retarget_search(&mut self.query, term) {
      return false;
    }
    self.term = term.trim().to_string();
    self.list_state = ListState::default();
    true
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("enter", "details").with_priority(5),
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("/", "new search").with_priority(20),
      ShortcutInfo::new("q", "back").with_priority(30),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{render_view, settle, view_context, ScriptedTransport};
  use std::time::Duration;

  #[tokio::test]
  async fn test_blank_term_has_no_view() {
    let transport = ScriptedTransport::new();
    assert!(SearchView::new(view_context(&transport), "   ").is_none());
    assert_eq!(transport.total_calls(), 0);
  }

  #[tokio::test]
  async fn test_results_render_in_server_order() {
    let transport = ScriptedTransport::new();
    let ctx = view_context(&transport);
    transport.respond(
      &ctx.endpoints().search("toyota"),
      200,
      r#"[{"id": 5, "name": "Toyota Yaris", "condition": "Used", "price": 7000},
          {"id": 3, "name": "Toyota Camry", "condition": "New", "price": 31000}]"#,
    );

    let mut view = SearchView::new(ctx, " toyota ").unwrap();
    settle(&mut view).await;
    let screen = render_view(&mut view, 100, 10);

    assert!(screen.contains("Results for: \"toyota\""));
    let yaris = screen.find("Toyota Yaris").unwrap();
    let camry = screen.find("Toyota Camry").unwrap();
    assert!(yaris < camry);
  }

  #[tokio::test]
  async fn test_not_found_renders_no_results_notice() {
    let transport = ScriptedTransport::new();
    let ctx = view_context(&transport);
    transport.respond(&ctx.endpoints().search("zzz"), 404, "");

    let mut view = SearchView::new(ctx, "zzz").unwrap();
    settle(&mut view).await;
    let screen = render_view(&mut view, 100, 10);

    assert!(screen.contains("No cars found for \"zzz\""));
    assert!(screen.contains("Try a different brand, model, or keyword"));
    assert!(!screen.contains("Oops"));
  }

  #[tokio::test]
  async fn test_network_error_renders_generic_error() {
    let transport = ScriptedTransport::new();
    let ctx = view_context(&transport);
    transport.fail(&ctx.endpoints().search("bmw"), "timed out");

    let mut view = SearchView::new(ctx, "bmw").unwrap();
    settle(&mut view).await;
    let screen = render_view(&mut view, 200, 10);

    assert!(screen.contains("Oops! Something went wrong while loading your searched car."));
    assert!(!screen.contains("No cars found"));
  }

  #[tokio::test]
  async fn test_retarget_ignores_previous_term() {
    let transport = ScriptedTransport::new();
    let ctx = view_context(&transport);
    transport.respond(
      &ctx.endpoints().search("audi"),
      200,
      r#"[{"id": 8, "name": "Audi A4"}]"#,
    );
    transport.respond(
      &ctx.endpoints().search("bmw"),
      200,
      r#"[{"id": 9, "name": "BMW X5"}]"#,
    );
    transport.set_delay(Duration::from_millis(20));

    let mut view = SearchView::new(ctx, "audi").unwrap();
    // Let the audi request get in flight, then switch terms
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert!(view.retarget_search("bmw"));
    tokio::time::sleep(Duration::from_millis(60)).await;
    view.tick();
    let screen = render_view(&mut view, 100, 10);

    assert!(screen.contains("BMW X5"));
    assert!(!screen.contains("Audi A4"));
    assert_eq!(view.breadcrumb_label(), "Search \"bmw\"");
  }

  #[tokio::test]
  async fn test_blank_retarget_keeps_current_search() {
    let transport = ScriptedTransport::new();
    let mut view = SearchView::new(view_context(&transport), "audi").unwrap();
    assert!(!view.retarget_search("  "));
    assert_eq!(view.breadcrumb_label(), "Search \"audi\"");
  }
}
