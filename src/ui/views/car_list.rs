use crate::catalog::{Condition, Vehicle};
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

/// Full listing of new or used cars
pub struct CarListView {
  ctx: ViewContext,
  condition: Condition,
  query: Query<Vec<Vehicle>>,
  list_state: ListState,
}

impl CarListView {
  pub fn new(ctx: ViewContext, condition: Condition) -> Self {
    let query = ctx.all_cars_query();
    Self {
      ctx,
      condition,
      query,
      list_state: ListState::default(),
    }
  }

  fn title(&self) -> &'static str {
    match self.condition {
      Condition::Used => "Clean Used Cars For You",
      _ => "Brand New Cars For You",
    }
  }

  fn page_name(&self) -> &'static str {
    match self.condition {
      Condition::Used => "Used Cars",
      _ => "New Cars",
    }
  }

  fn shown(&self) -> Vec<&Vehicle> {
    let filter = self.ctx.listing_filter(Some(self.condition));
    match listing_content(self.query.state(), &filter) {
      ListingContent::Cars(cars) => cars,
      _ => Vec::new(),
    }
  }
}

impl View for CarListView {
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
    let filter = self.ctx.listing_filter(Some(self.condition));
    let content = listing_content(self.query.state(), &filter);

    let count = match &content {
      ListingContent::Cars(cars) => format!(" ({})", cars.len()),
      _ => String::new(),
    };
    let block = Block::default()
      .title(format!(" {}{} ", self.title(), count))
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
        vec![Line::from(error_message(&format!("the {}", self.page_name())))],
        Color::LightRed,
      ),
      ListingContent::Empty => render_notice(
        frame,
        area,
        block,
        vec![Line::from(format!(
          "No {} available right now.",
          self.page_name().to_lowercase()
        ))],
        Color::DarkGray,
      ),
      ListingContent::Cars(cars) => {
        ensure_valid_selection(&mut self.list_state, cars.len());
        render_cars(frame, area, block, &cars, &mut self.list_state);
      }
    }
  }

  fn breadcrumb_label(&self) -> String {
    self.page_name().to_string()
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("enter", "details").with_priority(5),
      ShortcutInfo::new("r", "refresh").with_priority(25),
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("/", "search").with_priority(20),
      ShortcutInfo::new("q", "back").with_priority(30),
    ]
  }
}
