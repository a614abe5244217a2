mod app;
mod cache;
mod catalog;
mod commands;
mod config;
mod error;
mod event;
mod fetcher;
mod logging;
mod query;
mod route;
#[cfg(test)]
mod testing;
mod ui;

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing::info;

use crate::cache::{CacheLayer, SqliteStore};
use crate::catalog::{CatalogEndpoints, ReqwestTransport};
use crate::config::{CachePolicyKind, Config};
use crate::fetcher::Fetcher;
use crate::route::Route;
use crate::ui::context::ViewContext;

#[derive(Parser, Debug)]
#[command(name = "ebucars")]
#[command(about = "Browse the Ebucars dealership catalog from your terminal")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/ebucars/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Catalog API base URL (overrides config and EBUCARS_API_URL)
  #[arg(long)]
  api_url: Option<String>,

  /// Page to open, e.g. /used_cars, /car_details/3, /search?searchTerm=bmw
  #[arg(short, long, default_value = "/")]
  open: String,

  /// Cache policy for this session
  #[arg(long, value_enum)]
  cache_policy: Option<CachePolicyKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let mut config = Config::load(args.config.as_deref())?;
  if let Some(url) = args.api_url {
    config.api.base_url = url;
  }
  if let Some(policy) = args.cache_policy {
    config.cache.policy = policy;
  }

  let route =
    Route::from_path(&args.open).ok_or_else(|| eyre!("Unknown page: {}", args.open))?;

  let _log_guard = logging::init(&config.log.filter, &logging::log_dir())?;

  let endpoints = CatalogEndpoints::new(&config.api.base_url)?;
  let transport = ReqwestTransport::new(config.api.timeout())?;
  // One in-memory store per run: the cache lives exactly as long as the session
  let cache = CacheLayer::new(SqliteStore::open_in_memory()?, config.cache.policy());
  let fetcher = Fetcher::new(cache, transport);

  info!(
    api = %config.api.base_url,
    cache_policy = ?fetcher.cache().policy(),
    "starting"
  );

  let ctx = ViewContext::new(fetcher, endpoints, config.display.clone());
  let mut app = app::App::new(ctx, route);
  app.run().await?;

  Ok(())
}
