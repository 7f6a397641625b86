//! Async HTTP client wrapping the upstream joke API.

use std::time::Duration;

use jokes_core::{
  joke::{JokeContent, MAX_FIELD_LEN},
  source::JokeSource,
};
use reqwest::Client;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Connection settings for the upstream joke API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
  /// Endpoint returning one joke as a JSON object.
  pub url:     String,
  pub timeout: Duration,
}

/// Fetches random jokes from the configured upstream endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct HttpJokeSource {
  client: Client,
  url:    String,
}

impl HttpJokeSource {
  pub fn new(config: UpstreamConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .user_agent(concat!("jokes-server/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self { client, url: config.url })
  }

  pub fn url(&self) -> &str { &self.url }

  /// `GET <url>` and decode `{setup, punchline}`.
  pub async fn fetch(&self) -> Result<JokeContent> {
    debug!(url = %self.url, "fetching joke");
    let resp = self.client.get(&self.url).send().await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let content: JokeContent = resp.json().await?;
    if let Some((field, len)) = content.oversized_field() {
      return Err(Error::FieldTooLong { field, len, limit: MAX_FIELD_LEN });
    }
    Ok(content)
  }
}

impl JokeSource for HttpJokeSource {
  async fn fetch_one(&self) -> jokes_core::Result<JokeContent> {
    let content = self
      .fetch()
      .await
      .inspect_err(|e| warn!(url = %self.url, error = %e, "upstream fetch failed"))?;
    Ok(content)
  }
}
