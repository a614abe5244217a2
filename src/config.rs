use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CachePolicy;
use crate::catalog::IncompleteListings;

pub const DEFAULT_API_URL: &str = "https://ebucars-car-dealership-website.onrender.com";

/// Environment variable that replaces `api.base_url`
pub const API_URL_ENV: &str = "EBUCARS_API_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  pub cache: CacheConfig,
  pub display: DisplayConfig,
  pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String,
  /// Whole-request timeout; 0 disables it
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_API_URL.to_string(),
      timeout_secs: 30,
    }
  }
}

impl ApiConfig {
  pub fn timeout(&self) -> Option<Duration> {
    (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
  }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicyKind {
  /// Entries live for the whole session
  #[default]
  Session,
  /// Entries older than `ttl_secs` are refetched
  Ttl,
  /// Every request goes to the network
  Disabled,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  pub policy: CachePolicyKind,
  pub ttl_secs: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      policy: CachePolicyKind::Session,
      ttl_secs: 300,
    }
  }
}

impl CacheConfig {
  pub fn policy(&self) -> CachePolicy {
    match self.policy {
      CachePolicyKind::Session => CachePolicy::Session,
      CachePolicyKind::Ttl => CachePolicy::Ttl(Duration::from_secs(self.ttl_secs)),
      CachePolicyKind::Disabled => CachePolicy::Disabled,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
  /// Listings per section on the home page
  pub home_preview_count: usize,
  pub incomplete_listings: IncompleteListings,
}

impl Default for DisplayConfig {
  fn default() -> Self {
    Self {
      home_preview_count: 3,
      incomplete_listings: IncompleteListings::Show,
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// `EnvFilter` directive, overridden by `RUST_LOG`
  pub filter: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      filter: "info".to_string(),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./ebucars.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/ebucars/config.yaml
  ///
  /// With no file found the built-in defaults are used. `EBUCARS_API_URL`
  /// is applied on top in every case.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    Ok(config.with_env_overrides(std::env::var(API_URL_ENV).ok()))
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("ebucars.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("ebucars").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml_str(contents: &str) -> Result<Self> {
    // An empty file deserializes as unit, not as an empty mapping
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  fn with_env_overrides(mut self, api_url: Option<String>) -> Self {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
      self.api.base_url = url.trim().to_string();
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
    assert_eq!(config.api.timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.cache.policy(), CachePolicy::Session);
    assert_eq!(config.display.home_preview_count, 3);
    assert_eq!(config.display.incomplete_listings, IncompleteListings::Show);
    assert_eq!(config.log.filter, "info");
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = Config::from_yaml_str("  \n").unwrap();
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
  }

  #[test]
  fn test_partial_file_keeps_other_defaults() {
    let config = Config::from_yaml_str("cache:\n  policy: ttl\n").unwrap();
    assert_eq!(
      config.cache.policy(),
      CachePolicy::Ttl(Duration::from_secs(300))
    );
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.display.home_preview_count, 3);
  }

  #[test]
  fn test_full_file() {
    let yaml = r#"
api:
  base_url: http://localhost:4000
  timeout_secs: 0
cache:
  policy: disabled
display:
  home_preview_count: 5
  incomplete_listings: hide
log:
  filter: ebucars=debug
"#;
    let config = Config::from_yaml_str(yaml).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:4000");
    assert_eq!(config.api.timeout(), None);
    assert_eq!(config.cache.policy(), CachePolicy::Disabled);
    assert_eq!(config.display.home_preview_count, 5);
    assert_eq!(config.display.incomplete_listings, IncompleteListings::Hide);
    assert_eq!(config.log.filter, "ebucars=debug");
  }

  #[test]
  fn test_unknown_policy_is_rejected() {
    assert!(Config::from_yaml_str("cache:\n  policy: forever\n").is_err());
  }

  #[test]
  fn test_env_override() {
    let config = Config::default().with_env_overrides(Some(" http://127.0.0.1:9 ".into()));
    assert_eq!(config.api.base_url, "http://127.0.0.1:9");

    let config = Config::default().with_env_overrides(Some("  ".into()));
    assert_eq!(config.api.base_url, DEFAULT_API_URL);

    let config = Config::default().with_env_overrides(None);
    assert_eq!(config.api.base_url, DEFAULT_API_URL);
  }

  #[test]
  fn test_missing_explicit_path_is_an_error() {
    let err = Config::load(Some(Path::new("/nonexistent/ebucars.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }
}
