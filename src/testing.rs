//! Test doubles shared across unit tests.

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use crate::cache::{CacheLayer, CachePolicy, SqliteStore};
use crate::catalog::{CatalogEndpoints, HttpResponse, HttpTransport};
use crate::config::DisplayConfig;
use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::ui::context::ViewContext;
use crate::ui::view::View;

/// One new and one used listing, in that order.
pub const TWO_CARS: &str = r#"[
  {"id": 1, "name": "Toyota Corolla", "brand": "Toyota", "price": 20000,
   "condition": "New", "images": ["https://img.example.com/1.jpg"]},
  {"id": 2, "name": "Honda Civic", "brand": "Honda", "price": 9000,
   "condition": "Used", "images": ["https://img.example.com/2.jpg"]}
]"#;

#[derive(Clone)]
enum Scripted {
  Respond(HttpResponse),
  Fail(String),
}

#[derive(Default)]
struct Script {
  routes: HashMap<String, Scripted>,
  calls: Vec<String>,
  delay: Duration,
}

/// Transport answering from a fixed URL table and recording every call.
///
/// Unscripted URLs answer 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
  script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(&self, url: &Url, status: u16, body: &str) {
    self.script.lock().unwrap().routes.insert(
      url.to_string(),
      Scripted::Respond(HttpResponse {
        status,
        body: body.to_string(),
      }),
    );
  }

  pub fn fail(&self, url: &Url, message: &str) {
    self
      .script
      .lock()
      .unwrap()
      .routes
      .insert(url.to_string(), Scripted::Fail(message.to_string()));
  }

  /// Delay every response, so callers can overlap.
  pub fn set_delay(&self, delay: Duration) {
    self.script.lock().unwrap().delay = delay;
  }

  pub fn calls_to(&self, url: &Url) -> usize {
    let wanted = url.to_string();
    self
      .script
      .lock()
      .unwrap()
      .calls
      .iter()
      .filter(|u| **u == wanted)
      .count()
  }

  pub fn total_calls(&self) -> usize {
    self.script.lock().unwrap().calls.len()
  }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
  async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
    let (answer, delay) = {
      let mut script = self.script.lock().unwrap();
      script.calls.push(url.to_string());
      (script.routes.get(url.as_str()).cloned(), script.delay)
    };

    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }

    match answer {
      Some(Scripted::Respond(response)) => Ok(response),
      Some(Scripted::Fail(message)) => Err(FetchError::Transport(message)),
      None => Ok(HttpResponse {
        status: 404,
        body: String::new(),
      }),
    }
  }
}

/// Views over a session-cached fetcher talking to `transport`, with the
/// API at `https://cars.example.com`.
pub fn view_context(transport: &ScriptedTransport) -> ViewContext {
  let cache = CacheLayer::new(
    SqliteStore::open_in_memory().unwrap(),
    CachePolicy::Session,
  );
  ViewContext::new(
    Fetcher::new(cache, transport.clone()),
    CatalogEndpoints::new("https://cars.example.com").unwrap(),
    DisplayConfig::default(),
  )
}

pub fn press(code: KeyCode) -> KeyEvent {
  KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
  KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Let spawned requests finish and deliver their results to `view`.
pub async fn settle(view: &mut impl View) {
  for _ in 0..5 {
    tokio::time::sleep(Duration::from_millis(2)).await;
    view.tick();
  }
}

/// Render `view` into a `width` x `height` buffer, one line per row.
pub fn render_view(view: &mut dyn View, width: u16, height: u16) -> String {
  let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
  terminal.draw(|f| view.render(f, f.area())).unwrap();

  let buffer = terminal.backend().buffer();
  buffer
    .content
    .chunks(width as usize)
    .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
    .collect::<Vec<_>>()
    .join("\n")
}
