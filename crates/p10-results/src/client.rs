//! Fetching classifications over HTTP.

use std::{future::Future, time::Duration};

use p10_core::{prediction::SessionKind, result::RaceResult};
use reqwest::Client;

use crate::{Error, Result, ergast};

pub const DEFAULT_BASE_URL: &str = "https://api.jolpi.ca/ergast/f1";

/// Anything that can produce the official classification of a race session.
///
/// `Ok(None)` means the provider has nothing for that session yet.
pub trait ResultsSource: Send + Sync {
  fn fetch_result(
    &self,
    round: u32,
    session: SessionKind,
  ) -> impl Future<Output = Result<Option<RaceResult>>> + Send + '_;
}

/// HTTP client for an Ergast-compatible results API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ResultsClient {
  client:   Client,
  base_url: String,
  season:   i32,
}

impl ResultsClient {
  pub fn new(base_url: impl Into<String>, season: i32) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent(concat!("p10/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(Self {
      client,
      base_url: base_url.into(),
      season,
    })
  }

  /// `{base}/{season}/{round}/results.json` or `.../sprint.json`.
  pub fn url(&self, round: u32, session: SessionKind) -> String {
    let resource = match session {
      SessionKind::Main => "results",
      SessionKind::Sprint => "sprint",
    };
    format!(
      "{}/{}/{}/{}.json",
      self.base_url.trim_end_matches('/'),
      self.season,
      round,
      resource
    )
  }
}

impl ResultsSource for ResultsClient {
  async fn fetch_result(&self, round: u32, session: SessionKind) -> Result<Option<RaceResult>> {
    let url = self.url(round, session);
    tracing::debug!(%url, "fetching classification");

    let resp = self.client.get(&url).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status {
        url,
        status: resp.status().as_u16(),
      });
    }
    let body = resp.text().await?;
    ergast::parse_result(&body, round, session)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_provider_urls() {
    let client = ResultsClient::new(DEFAULT_BASE_URL, 2026).unwrap();
    assert_eq!(
      client.url(1, SessionKind::Main),
      "https://api.jolpi.ca/ergast/f1/2026/1/results.json"
    );
    assert_eq!(
      client.url(6, SessionKind::Sprint),
      "https://api.jolpi.ca/ergast/f1/2026/6/sprint.json"
    );
  }

  #[test]
  fn trailing_slash_is_ignored() {
    let client = ResultsClient::new("http://localhost:8000/", 2025).unwrap();
    assert_eq!(
      client.url(24, SessionKind::Main),
      "http://localhost:8000/2025/24/results.json"
    );
  }
}
