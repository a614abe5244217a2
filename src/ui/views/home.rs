use crate::catalog::{Condition, Vehicle};
use crate::query::Query;
use crate::ui::context::ViewContext;
use crate::ui::ensure_valid_selection;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::listing::{
  error_message, listing_content, render_cars, render_notice, ListingContent, LOADING_MESSAGE,
};
use crate::ui::views::{CarDetailView, CarListView};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, ListState, Paragraph};

/// Landing page: a short preview of new and used cars
pub struct HomeView {
  ctx: ViewContext,
  query: Query<Vec<Vehicle>>,
  focus: Condition,
  new_state: ListState,
  used_state: ListState,
}

impl HomeView {
  pub fn new(ctx: ViewContext) -> Self {
    let query = ctx.all_cars_query();
    Self {
      ctx,
      query,
      focus: Condition::New,
      new_state: ListState::default(),
      used_state: ListState::default(),
    }
  }

  /// Preview rows for one section
  fn preview(&self, condition: Condition) -> Vec<&Vehicle> {
    let filter = self
      .ctx
      .listing_filter(Some(condition))
      .with_limit(self.ctx.display().home_preview_count);
    match listing_content(self.query.state(), &filter) {
      ListingContent::Cars(cars) => cars,
      _ => Vec::new(),
    }
  }

  fn focused_state(&mut self) -> &mut ListState {
    match self.focus {
      Condition::Used => &mut self.used_state,
      _ => &mut self.new_state,
    }
  }

  fn toggle_focus(&mut self) {
    self.focus = match self.focus {
      Condition::New => Condition::Used,
      _ => Condition::New,
    };
  }

  fn render_section(&mut self, frame: &mut Frame, area: Rect, condition: Condition) {
    let (heading, page) = match condition {
      Condition::Used => ("Used Cars", "the Used Cars"),
      _ => ("New Cars", "the New Cars"),
    };
    let focused = self.focus == condition;
    let border = if focused { Color::Cyan } else { Color::Blue };
    let block = Block::default()
      .title(format!(" {} ", heading))
      .title_bottom(Line::from(format!(" <m> View More {} ", heading)).right_aligned())
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border));

    let filter = self
      .ctx
      .listing_filter(Some(condition))
      .with_limit(self.ctx.display().home_preview_count);
    let state = match condition {
      Condition::Used => &mut self.used_state,
      _ => &mut self.new_state,
    };

    match listing_content(self.query.state(), &filter) {
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
        vec![Line::from(error_message(page))],
        Color::LightRed,
      ),
      ListingContent::Empty => render_notice(
        frame,
        area,
        block,
        vec![Line::from("Nothing here yet.")],
        Color::DarkGray,
      ),
      ListingContent::Cars(cars) => {
        ensure_valid_selection(state, cars.len());
        if !focused {
          // Only the focused section shows a cursor
          state.select(None);
        }
        render_cars(frame, area, block, &cars, state);
      }
    }
  }
}

impl View for HomeView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.focused_state().select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.focused_state().select_previous(),
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
        self.toggle_focus()
      }
      KeyCode::Char('r') => self.query.refetch(),
      KeyCode::Char('m') => {
        return ViewAction::Push(Box::new(CarListView::new(self.ctx.clone(), self.focus)));
      }
      KeyCode::Enter => {
        let selected = self.focused_state().selected();
        let id = selected.and_then(|idx| self.preview(self.focus).get(idx).map(|v| v.id));
        if let Some(id) = id {
          return ViewAction::Push(Box::new(CarDetailView::new(self.ctx.clone(), id)));
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(2), // Hero
        Constraint::Min(0),    // Sections
      ])
      .split(area);

    let hero = Paragraph::new(vec![
      Line::from("Find Your Perfect Drive").bold().fg(Color::Cyan),
      Line::from("Brand new and clean used cars, ready when you are").fg(Color::DarkGray),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hero, chunks[0]);

    let sections = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
      .split(chunks[1]);

    self.render_section(frame, sections[0], Condition::New);
    self.render_section(frame, sections[1], Condition::Used);
  }

  fn breadcrumb_label(&self) -> String {
    "Home".to_string()
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("tab", "switch").with_priority(5),
      ShortcutInfo::new("m", "view more").with_priority(6),
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("/", "search").with_priority(20),
      ShortcutInfo::new("q", "quit").with_priority(30),
    ]
  }
}
