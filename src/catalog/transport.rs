//! HTTP transport for the catalog API.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::error::FetchError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  /// Response body; left empty for non-success responses
  pub body: String,
}

/// Something that can perform a GET request.
///
/// An `Err` means no response was obtained at all. Any response, whatever
/// its status, comes back as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
  async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  /// Build a client; `timeout` bounds the whole request including the body.
  pub fn new(timeout: Option<Duration>) -> Result<Self> {
    let mut builder = Client::builder().user_agent(concat!(
      env!("CARGO_PKG_NAME"),
      "/",
      env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }

    let client = builder
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client })
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
    let response = self
      .client
      .get(url.clone())
      .header(ACCEPT, "application/json")
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Ok(HttpResponse {
        status: status.as_u16(),
        body: String::new(),
      });
    }

    let body = response.text().await?;
    Ok(HttpResponse {
      status: status.as_u16(),
      body,
    })
  }
}
