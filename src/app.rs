use crate::catalog::Condition;
use crate::commands::CommandAction;
use crate::event::{Event, EventHandler};
use crate::route::Route;
use crate::ui;
use crate::ui::components::{CommandEvent, CommandInput, KeyResult, SearchEvent, SearchInput};
use crate::ui::context::ViewContext;
use crate::ui::view::{View, ViewAction};
use crate::ui::views::{CarDetailView, CarListView, HomeView, SearchView};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{info, warn};

const TICK_RATE: Duration = Duration::from_millis(100);

/// Build the view for `route`
pub fn view_for(ctx: &ViewContext, route: &Route) -> Box<dyn View> {
  match route {
    Route::Home => Box::new(HomeView::new(ctx.clone())),
    Route::NewCars => Box::new(CarListView::new(ctx.clone(), Condition::New)),
    Route::UsedCars => Box::new(CarListView::new(ctx.clone(), Condition::Used)),
    Route::CarDetails { id } => Box::new(CarDetailView::new(ctx.clone(), *id)),
    Route::Search { term } => match SearchView::new(ctx.clone(), term) {
      Some(view) => Box::new(view),
      // Search routes always carry a non-blank term
      None => Box::new(HomeView::new(ctx.clone())),
    },
  }
}

/// Main application state
pub struct App {
  ctx: ViewContext,

  /// Navigation stack; the root is always at index 0
  view_stack: Vec<Box<dyn View>>,

  command: CommandInput,
  search: SearchInput,

  should_quit: bool,
}

impl App {
  /// Start on `route`. Anything but home sits on top of a home root so
  /// going back lands on the landing page.
  pub fn new(ctx: ViewContext, route: Route) -> Self {
    info!(route = %route.to_path(), "opening");
    let mut view_stack = vec![view_for(&ctx, &Route::Home)];
    if route != Route::Home {
      view_stack.push(view_for(&ctx, &route));
    }

    Self {
      ctx,
      view_stack,
      command: CommandInput::new(),
      search: SearchInput::new(),
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = self.event_loop(&mut terminal).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
    let mut events = EventHandler::new(TICK_RATE);

    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }

    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => self.tick(),
      Event::Resize => {}
    }
  }

  /// Poll the visible view's queries
  pub fn tick(&mut self) {
    if let Some(view) = self.view_stack.last_mut() {
      view.tick();
    }
  }

  pub fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Overlays first; each also owns its activation key. A ':' typed into
    // the search box belongs to the search term.
    if !self.search.is_active() {
      match self.command.handle_key(key) {
        KeyResult::Event(CommandEvent::Run(action)) => return self.run_command(action),
        KeyResult::Event(CommandEvent::Unknown(input)) => {
          warn!(command = %input, "unknown command");
          return;
        }
        KeyResult::Event(CommandEvent::Cancelled) | KeyResult::Handled => return,
        KeyResult::NotHandled => {}
      }
    }

    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Submitted(term)) => return self.open_search(&term),
      KeyResult::Event(SearchEvent::Cancelled) | KeyResult::Handled => return,
      KeyResult::NotHandled => {}
    }

    let action = match self.view_stack.last_mut() {
      Some(view) => view.handle_key(key),
      None => ViewAction::None,
    };
    self.apply(action);
  }

  fn apply(&mut self, action: ViewAction) {
    match action {
      ViewAction::None => {}
      ViewAction::Push(view) => {
        info!(view = %view.breadcrumb_label(), "navigating");
        self.view_stack.push(view);
      }
      ViewAction::Pop => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
    }
  }

  fn run_command(&mut self, action: CommandAction) {
    match action {
      CommandAction::Home => self.reset_to(Route::Home),
      CommandAction::NewCars => self.reset_to(Route::NewCars),
      CommandAction::UsedCars => self.reset_to(Route::UsedCars),
      CommandAction::Search => self.search.activate(),
      CommandAction::Quit => self.should_quit = true,
    }
  }

  /// Replace the whole stack with `route` on top of home.
  fn reset_to(&mut self, route: Route) {
    info!(route = %route.to_path(), "navigating");
    self.view_stack.truncate(1);
    if route != Route::Home {
      self.view_stack.push(view_for(&self.ctx, &route));
    }
  }

  /// Show results for `term`, reusing the current view if it is a search.
  fn open_search(&mut self, term: &str) {
    if let Some(view) = self.view_stack.last_mut() {
      if view.retarget_search(term) {
        info!(term, "search retargeted");
        return;
      }
    }
    if let Some(route) = Route::search(term) {
      self.apply(ViewAction::Push(view_for(&self.ctx, &route)));
    }
  }

  pub fn render_overlays(&self, frame: &mut Frame, area: Rect) {
    if self.command.is_active() {
      self.command.render_overlay(frame, area);
    } else {
      self.search.render_overlay(frame, area);
    }
  }

  // Accessors for UI rendering
  pub fn current_view(&self) -> Option<&dyn View> {
    self.view_stack.last().map(|v| v.as_ref())
  }

  pub fn current_view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
    self.view_stack.last_mut().map(|v| v.as_mut())
  }

  pub fn api_host(&self) -> String {
    self.ctx.endpoints().host()
  }

  pub fn cached_entries(&self) -> usize {
    self.ctx.fetcher().cache().len()
  }

  pub fn breadcrumb(&self) -> Vec<String> {
    self
      .view_stack
      .iter()
      .map(|v| v.breadcrumb_label())
      .collect()
  }
}
