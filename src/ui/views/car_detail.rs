use crate::catalog::Vehicle;
use crate::query::{Query, QueryState};
use crate::ui::context::ViewContext;
use crate::ui::renderfns::{availability_color, condition_color, format_mileage, format_price};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::listing::{error_message, LOADING_MESSAGE};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Every attribute of one listing
pub struct CarDetailView {
  id: u64,
  query: Query<Vehicle>,
  scroll: u16,
  /// Last line that may sit at the top of the pane, as of the last render
  max_scroll: u16,
}

impl CarDetailView {
  pub fn new(ctx: ViewContext, id: u64) -> Self {
    Self {
      id,
      query: ctx.car_query(id),
      scroll: 0,
      max_scroll: 0,
    }
  }

  fn title(&self) -> String {
    match self.query.data() {
      Some(car) if !car.name.is_empty() => format!(" {} ", car.name),
      _ => format!(" Car #{} ", self.id),
    }
  }
}

fn field<'a>(label: &'static str, value: impl Into<Span<'a>>) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
    value.into(),
  ])
}

fn or_dash(s: &str) -> &str {
  if s.is_empty() {
    "-"
  } else {
    s
  }
}

/// Lines describing `car`, with placeholders for anything missing.
pub fn detail_lines(car: &Vehicle) -> Vec<Line<'_>> {
  let mut lines = vec![
    field(
      "Price",
      Span::styled(format_price(car.price), Style::default().fg(Color::Yellow).bold()),
    ),
    field(
      "Condition",
      Span::styled(
        car.condition.label(),
        Style::default().fg(condition_color(car.condition)),
      ),
    ),
    field(
      "Availability",
      Span::styled(
        or_dash(&car.availability),
        Style::default().fg(availability_color(&car.availability)),
      ),
    ),
    field("Brand", or_dash(&car.brand)),
    field(
      "Year",
      car.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
    ),
    field("Mileage", format_mileage(car.mileage)),
    field("Transmission", or_dash(&car.transmission)),
    field("Fuel", or_dash(&car.fuel)),
    field("Engine", or_dash(&car.engine)),
    field("Color", or_dash(&car.color)),
    field("Location", or_dash(&car.location)),
    Line::from(""),
  ];

  if !car.description.is_empty() {
    lines.push(Line::from(car.description.as_str()));
    lines.push(Line::from(""));
  }

  lines.push(Line::from("Features").bold());
  if car.features.is_empty() {
    lines.push(Line::from("  None listed").fg(Color::DarkGray));
  } else {
    lines.extend(car.features.iter().map(|f| Line::from(format!("  • {}", f))));
  }
  lines.push(Line::from(""));

  lines.push(Line::from("Photos").bold());
  match car.cover_image() {
    None => lines.push(Line::from("  No photos").fg(Color::DarkGray)),
    Some(cover) => {
      lines.push(Line::from(vec![
        Span::styled(format!("  {}", cover), Style::default().fg(Color::Blue)),
        Span::styled(" (cover)", Style::default().fg(Color::DarkGray)),
      ]));
      lines.extend(
        car
          .images
          .iter()
          .skip(1)
          .map(|url| Line::from(format!("  {}", url)).fg(Color::Blue)),
      );
    }
  }

  lines
}

impl View for CarDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll)
      }
      KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Char('r') => {
        self.scroll = 0;
        self.query.refetch();
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(self.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let (lines, centered) = match self.query.state() {
      QueryState::Idle | QueryState::Loading => {
        (vec![Line::from(LOADING_MESSAGE).fg(Color::DarkGray)], true)
      }
      QueryState::NotFound => (
        vec![Line::from(format!("Car #{} was not found.", self.id)).fg(Color::DarkGray)],
        true,
      ),
      QueryState::Error(_) => (
        vec![Line::from(error_message("this car")).fg(Color::LightRed)],
        true,
      ),
      QueryState::Success(car) => (detail_lines(car), false),
    };

    self.max_scroll = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
    self.scroll = self.scroll.min(self.max_scroll);

    let mut paragraph = Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));
    if centered {
      paragraph = paragraph.alignment(Alignment::Center);
    }
    frame.render_widget(paragraph, area);
  }

  fn breadcrumb_label(&self) -> String {
    format!("Car #{}", self.id)
  }

  fn tick(&mut self) {
    self.query.poll();
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("j/k", "scroll").with_priority(5),
      ShortcutInfo::new("r", "refresh").with_priority(25),
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("q", "back").with_priority(30),
    ]
  }
}
